//! Whitespace handling, numeric literals, and machine lifecycle

mod common;

use common::{run, run_stack};
use fvm::{Status, Vm};

// ============================================================================
// Whitespace
// ============================================================================

#[test]
fn test_empty_line_is_a_successful_noop() {
    let vm = run("");
    assert!(vm.stack().is_empty());
    assert_eq!(vm.status(), Status::Ok);
}

#[test]
fn test_whitespace_only_line() {
    let vm = run("   \t  ");
    assert!(vm.stack().is_empty());
    assert_eq!(vm.status(), Status::Ok);
}

#[test]
fn test_extra_whitespace_between_words() {
    assert_eq!(run_stack("  1   2\t+  "), vec![3.0]);
}

// ============================================================================
// Numeric literals
// ============================================================================

#[test]
fn test_signed_literals() {
    assert_eq!(run_stack("+5 -5"), vec![5.0, -5.0]);
}

#[test]
fn test_fractional_literals() {
    assert_eq!(run_stack("0.5 .5 5."), vec![0.5, 0.5, 5.0]);
}

#[test]
fn test_exponent_literals() {
    assert_eq!(run_stack("1e3 2.5e-1"), vec![1000.0, 0.25]);
}

#[test]
fn test_number_like_garbage_is_invalid() {
    let mut vm = Vm::new();
    assert!(vm.execute("1 2x3").is_err());
    let mut vm = Vm::new();
    assert!(vm.execute("0x10").is_err());
}

// ============================================================================
// Machine lifecycle
// ============================================================================

#[test]
fn test_fresh_machine_observables() {
    let vm = Vm::new();
    assert!(vm.stack().is_empty());
    assert_eq!(vm.status(), Status::Ok);
    assert_eq!(vm.output(), "");
}

#[test]
fn test_stack_persists_across_calls() {
    let mut vm = Vm::new();
    vm.execute("1 2").expect("line should run");
    vm.execute("3").expect("line should run");
    vm.execute("+ +").expect("line should run");
    assert_eq!(vm.stack().as_slice(), &[6.0]);
}

#[test]
fn test_output_resets_even_when_the_line_fails() {
    let mut vm = Vm::new();
    vm.execute("1 .s").expect("line should run");
    assert_eq!(vm.output(), "<1> 1");
    let _ = vm.execute("bogus");
    assert_eq!(vm.output(), "");
}

#[test]
fn test_show_stack_before_failure_is_kept() {
    // output written before the failing word survives the abort
    let mut vm = Vm::new();
    let _ = vm.execute("1 2 .s bogus");
    assert_eq!(vm.output(), "<2> 1 2");
}

#[test]
fn test_pick_truncates_fractional_indices() {
    assert_eq!(run_stack("10 20 30 1.9 pick"), vec![10.0, 20.0, 30.0, 20.0]);
}

#[test]
fn test_pick_saturates_negative_indices() {
    // a negative index converts to zero and behaves as `0 pick`
    assert_eq!(run_stack("10 20 -1 pick"), vec![10.0, 20.0, 20.0]);
}
