use super::error::VmError;
use super::machine::{State, Vm};
use crate::token::BuiltinWord;
use indexmap::IndexMap;

pub type WordFn = fn(&mut Vm) -> Result<(), VmError>;

/// The builtin vocabulary: a fixed mapping from word name to a
/// stack-mutating operation. Built once per machine and read-only after
/// construction.
pub struct WordTable {
    entries: IndexMap<&'static str, WordFn>,
}

impl WordTable {
    pub fn new() -> Self {
        let mut entries: IndexMap<&'static str, WordFn> = IndexMap::new();

        entries.insert(".s", show_stack as WordFn);
        entries.insert("drop", drop_top);
        entries.insert("dup", dup);
        entries.insert("nip", nip);
        entries.insert("over", over);
        entries.insert("tuck", tuck);
        entries.insert("swap", swap);
        entries.insert("pick", pick);
        entries.insert("rot", rot);
        entries.insert("-rot", minus_rot);
        entries.insert("?dup", dup_if);
        entries.insert("roll", roll);
        entries.insert("2drop", two_drop);
        entries.insert("2nip", two_nip);
        entries.insert("2dup", two_dup);
        entries.insert("2over", two_over);
        entries.insert("2tuck", two_tuck);
        entries.insert("2swap", two_swap);
        entries.insert("2rot", two_rot);
        entries.insert("(", comment_open);
        entries.insert(")", comment_close);

        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<BuiltinWord> {
        self.entries
            .get_key_value(name)
            .map(|(name, func)| BuiltinWord { name, func: *func })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for WordTable {
    fn default() -> Self {
        Self::new()
    }
}

/// `( ... )` — `.s` records the stack display as the execution's output
fn show_stack(vm: &mut Vm) -> Result<(), VmError> {
    vm.output = vm.stack.to_string();
    Ok(())
}

/// `( a -- )`
fn drop_top(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(0)?;
    let _ = vm.stack.pop();
    Ok(())
}

/// `( a -- a a )`
fn dup(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(0)?;
    let top = vm.stack.try_pop()?;
    vm.stack.push(top);
    vm.stack.push(top);
    Ok(())
}

/// `( a b -- b )`
fn nip(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(1)?;
    let w2 = vm.stack.try_pop()?;
    let _ = vm.stack.pop();
    vm.stack.push(w2);
    Ok(())
}

/// `( a b -- a b a )`
fn over(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(1)?;
    if let Some(w1) = vm.stack.peek_back(1) {
        vm.stack.push(w1);
    }
    Ok(())
}

/// `( a b -- b a b )`
fn tuck(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(1)?;
    let w2 = vm.stack.try_pop()?;
    let w1 = vm.stack.try_pop()?;
    vm.stack.push(w2);
    vm.stack.push(w1);
    vm.stack.push(w2);
    Ok(())
}

/// `( a b -- b a )`
fn swap(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(1)?;
    let w2 = vm.stack.try_pop()?;
    let w1 = vm.stack.try_pop()?;
    vm.stack.push(w2);
    vm.stack.push(w1);
    Ok(())
}

/// `( ... n -- ... v )` — copies the element `n` below the new top onto the
/// top; `0 pick` behaves as `dup` once the index itself is removed. The
/// popped index truncates toward zero; negative indices saturate to 0.
fn pick(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(0)?;
    let n = vm.stack.try_pop()? as usize;
    vm.stack.require_more_than(n)?;
    if let Some(picked) = vm.stack.peek_back(n) {
        vm.stack.push(picked);
    }
    Ok(())
}

/// `( a b c -- b c a )`
fn rot(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(2)?;
    let w3 = vm.stack.try_pop()?;
    let w2 = vm.stack.try_pop()?;
    let w1 = vm.stack.try_pop()?;
    vm.stack.push(w2);
    vm.stack.push(w3);
    vm.stack.push(w1);
    Ok(())
}

/// `( a b c -- c a b )`
fn minus_rot(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(2)?;
    let w3 = vm.stack.try_pop()?;
    let w2 = vm.stack.try_pop()?;
    let w1 = vm.stack.try_pop()?;
    vm.stack.push(w3);
    vm.stack.push(w1);
    vm.stack.push(w2);
    Ok(())
}

/// `( a -- a a )` if `a` is truthy, else `( a -- a )`
fn dup_if(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(0)?;
    if let Some(top) = vm.stack.peek() {
        if is_truthy(top) {
            vm.stack.push(top);
        }
    }
    Ok(())
}

/// Pops a count and enforces the same depth precondition as `pick`, but
/// performs no further mutation.
// TODO: decide whether `roll` should rotate the n-th element to the top like
// standard Forth before giving it real semantics.
fn roll(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(0)?;
    let n = vm.stack.try_pop()? as usize;
    vm.stack.require_more_than(n)?;
    Ok(())
}

/// `( a b -- )`
fn two_drop(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(1)?;
    let _ = vm.stack.pop();
    let _ = vm.stack.pop();
    Ok(())
}

/// `( a b c d -- c d )`
fn two_nip(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(3)?;
    let w4 = vm.stack.try_pop()?;
    let w3 = vm.stack.try_pop()?;
    let _ = vm.stack.pop();
    let _ = vm.stack.pop();
    vm.stack.push(w3);
    vm.stack.push(w4);
    Ok(())
}

/// `( a b -- a b a b )`
fn two_dup(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(1)?;
    let w2 = vm.stack.try_pop()?;
    let w1 = vm.stack.try_pop()?;
    vm.stack.push(w1);
    vm.stack.push(w2);
    vm.stack.push(w1);
    vm.stack.push(w2);
    Ok(())
}

/// `( a b c d -- a b c d a b )`
fn two_over(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(3)?;
    let (w1, w2) = match (vm.stack.peek_back(3), vm.stack.peek_back(2)) {
        (Some(w1), Some(w2)) => (w1, w2),
        _ => return Err(VmError::stack_underflow()),
    };
    vm.stack.push(w1);
    vm.stack.push(w2);
    Ok(())
}

/// `( a b c d -- c d a b c d )`
fn two_tuck(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(3)?;
    let w4 = vm.stack.try_pop()?;
    let w3 = vm.stack.try_pop()?;
    let w2 = vm.stack.try_pop()?;
    let w1 = vm.stack.try_pop()?;
    for value in [w3, w4, w1, w2, w3, w4] {
        vm.stack.push(value);
    }
    Ok(())
}

/// `( a b c d -- c d a b )`
fn two_swap(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(3)?;
    let w4 = vm.stack.try_pop()?;
    let w3 = vm.stack.try_pop()?;
    let w2 = vm.stack.try_pop()?;
    let w1 = vm.stack.try_pop()?;
    for value in [w3, w4, w1, w2] {
        vm.stack.push(value);
    }
    Ok(())
}

/// `( a b c d e f -- c d e f a b )`
fn two_rot(vm: &mut Vm) -> Result<(), VmError> {
    vm.stack.require_more_than(5)?;
    let w6 = vm.stack.try_pop()?;
    let w5 = vm.stack.try_pop()?;
    let w4 = vm.stack.try_pop()?;
    let w3 = vm.stack.try_pop()?;
    let w2 = vm.stack.try_pop()?;
    let w1 = vm.stack.try_pop()?;
    for value in [w3, w4, w5, w6, w1, w2] {
        vm.stack.push(value);
    }
    Ok(())
}

fn comment_open(vm: &mut Vm) -> Result<(), VmError> {
    vm.state = State::InComment;
    Ok(())
}

fn comment_close(vm: &mut Vm) -> Result<(), VmError> {
    vm.state = State::Interpreting;
    Ok(())
}

/// Host numeric truthiness: zero and NaN are falsy.
fn is_truthy(value: f64) -> bool {
    value != 0.0 && !value.is_nan()
}
