//! The interpret/comment state machine

mod common;

use common::{run, run_stack};
use fvm::{Status, Vm};

#[test]
fn test_commented_words_have_no_effect() {
    assert_eq!(run_stack("1 ( 2 3 ) 4 +"), vec![5.0]);
}

#[test]
fn test_comment_suppresses_builtins_and_operators() {
    assert_eq!(run_stack("1 2 ( swap drop + ) .s"), vec![1.0, 2.0]);
}

#[test]
fn test_commented_invalid_words_do_not_error() {
    // words inside a comment are classified but never dispatched
    assert_eq!(run_stack("1 ( foo bar ) 2"), vec![1.0, 2.0]);
}

#[test]
fn test_show_stack_inside_comment_is_skipped() {
    let vm = run("1 ( .s ) 2");
    assert_eq!(vm.output(), "");
}

#[test]
fn test_bare_close_paren_is_a_noop() {
    assert_eq!(run_stack(") 1 2 +"), vec![3.0]);
}

#[test]
fn test_close_paren_resumes_interpreting_mid_line() {
    assert_eq!(run_stack("( skipped ) 5 dup"), vec![5.0, 5.0]);
}

#[test]
fn test_unterminated_comment_succeeds() {
    let vm = run("1 ( this never closes");
    assert_eq!(vm.status(), Status::Ok);
    assert_eq!(vm.stack().as_slice(), &[1.0]);
}

#[test]
fn test_unterminated_comment_does_not_leak_into_next_call() {
    // state force-resets to interpreting at the end of a successful call
    let mut vm = Vm::new();
    vm.execute("1 ( dangling").expect("line should run");
    vm.execute("2 3 +").expect("line should run");
    assert_eq!(vm.stack().as_slice(), &[1.0, 5.0]);
}

#[test]
fn test_reopened_comments_toggle_repeatedly() {
    assert_eq!(run_stack("1 ( a ) 2 ( b ) 3"), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_paren_words_must_stand_alone() {
    // `(2` is not a comment opener, it is an unknown word
    let mut vm = Vm::new();
    let err = vm.execute("1 (2 3").expect_err("line should fail");
    assert!(matches!(err, fvm::VmError::Parse { ref word, .. } if word == "(2"));
}
