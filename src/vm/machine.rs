use super::arith;
use super::error::VmError;
use super::stack::DataStack;
use super::words::WordTable;
use crate::diagnostic::Span;
use crate::lexer::lexer;
use crate::token::{classify, OpKind, Word};
use chumsky::Parser;
use std::fmt;

/// Result of the last completed `execute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Ok => write!(f, "ok"),
            Status::Error => write!(f, "?"),
        }
    }
}

/// The two states of the execution state machine. Dispatch effects apply
/// only while `Interpreting`; the comment toggles themselves are recognized
/// in either state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Interpreting,
    InComment,
}

/// The virtual machine: one numeric stack, the builtin word table, and the
/// observable results of the last run. Created once by the host and mutated
/// only through [`Vm::execute`]; constructing a new instance is the only way
/// to reset it.
pub struct Vm {
    pub(crate) stack: DataStack,
    pub(crate) words: WordTable,
    pub(crate) state: State,
    pub(crate) status: Status,
    pub(crate) output: String,
}

impl Vm {
    pub fn new() -> Self {
        Self {
            stack: DataStack::new(),
            words: WordTable::new(),
            state: State::Interpreting,
            status: Status::Ok,
            output: String::new(),
        }
    }

    /// Executes one line of input against the machine.
    ///
    /// `output` is reset at the start of every call. On success `status`
    /// becomes `Ok` and the interpreter state resets to `Interpreting`, even
    /// if the line left a comment open. On failure the call aborts at the
    /// offending word, `status` is left at `Error`, and stack mutations
    /// already applied stay in place.
    pub fn execute(&mut self, line: &str) -> Result<(), VmError> {
        self.output.clear();

        match self.run_line(line) {
            Ok(()) => {
                self.status = Status::Ok;
                self.state = State::Interpreting;
                Ok(())
            }
            Err(err) => {
                self.status = Status::Error;
                Err(err)
            }
        }
    }

    fn run_line(&mut self, line: &str) -> Result<(), VmError> {
        let tokens = match lexer().parse(line).into_output() {
            Some(tokens) => tokens,
            // The word grammar accepts any input, so this is unreachable in
            // practice; surface it as a parse error rather than panicking.
            None => return Err(VmError::parse(line.trim())),
        };

        for (raw, span) in tokens {
            let span = Span::new(span.start, span.end);
            self.step(&raw).map_err(|err| err.with_span(span))?;
        }
        Ok(())
    }

    fn step(&mut self, raw: &str) -> Result<(), VmError> {
        let word = classify(raw, &self.words);

        // Comment toggles dispatch before the interpret/skip decision, so a
        // `)` closes a comment from inside it and a bare `)` while already
        // interpreting is a harmless no-op.
        self.check_for_comment(&word)?;

        if self.state != State::Interpreting {
            return Ok(());
        }

        match word {
            Word::Number(value) => {
                self.stack.push(value);
                Ok(())
            }
            Word::Operator(kind) => self.attempt_binary_op(kind),
            Word::Builtin(builtin) => (builtin.func)(self),
            Word::Invalid(raw) => Err(VmError::parse(raw)),
        }
    }

    fn check_for_comment(&mut self, word: &Word) -> Result<(), VmError> {
        if let Word::Builtin(builtin) = word {
            if matches!(builtin.name, "(" | ")") {
                (builtin.func)(self)?;
            }
        }
        Ok(())
    }

    /// The stack-pop protocol for operators: an empty stack underflows, a
    /// single value is silently consumed without producing a result, and two
    /// or more values evaluate normally.
    fn attempt_binary_op(&mut self, kind: OpKind) -> Result<(), VmError> {
        if self.stack.is_empty() {
            return Err(VmError::stack_underflow());
        }
        if self.stack.len() == 1 {
            let _ = self.stack.pop();
            return Ok(());
        }

        let top = self.stack.try_pop()?;
        let second = self.stack.try_pop()?;
        let result = arith::evaluate(kind, top, second)?;
        self.stack.push(result);
        Ok(())
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn stack(&self) -> &DataStack {
        &self.stack
    }

    pub fn words(&self) -> &WordTable {
        &self.words
    }
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}
