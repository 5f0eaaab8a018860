//! Translation and runtime error types.
//!
//! Translation errors are fatal to the whole program: the translator rejects
//! the source without producing a partial program. Runtime errors are
//! instruction-local diagnostics; the machine reports them and keeps running.

use thiserror::Error;

/// Errors detected while translating source text into a program.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TranslationError {
    /// No instruction registered under this mnemonic.
    #[error("unknown opcode: {0}")]
    UnknownOpcode(String),
    /// Token where a register name was expected.
    #[error("{token} is not a register name")]
    ExpectedRegister { token: String },
    /// Token where a signed integer literal was expected.
    #[error("{token} is not an integer literal")]
    ExpectedInteger { token: String },
    /// Label defined more than once in one program.
    #[error("label {0} is already in use")]
    DuplicateLabel(String),
    /// A line carried a label but no instruction after it.
    #[error("label {0} is not followed by an instruction")]
    MissingOpcode(String),
    /// No registered signature of the opcode matched the supplied operands,
    /// either by arity or by operand type.
    #[error(
        "cannot build {opcode} from operands [{}]; valid operand shapes: {}",
        .supplied.join(", "),
        .candidates.join("; ")
    )]
    UnconstructableInstruction {
        /// The mnemonic that was requested.
        opcode: String,
        /// Every registered signature for the opcode, rendered as its
        /// expected operand kinds.
        candidates: Vec<String>,
        /// The raw operand tokens that were supplied.
        supplied: Vec<String>,
    },
    /// Any translation error, annotated with its 1-based source line.
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        source: Box<TranslationError>,
    },
}

impl TranslationError {
    /// Wraps the error with the 1-based source line it occurred on.
    pub(crate) fn at_line(self, line: usize) -> Self {
        TranslationError::AtLine {
            line,
            source: Box::new(self),
        }
    }
}

/// Faults raised while executing a single instruction.
///
/// These never abort the running program: the machine surfaces the
/// diagnostic and advances to the next instruction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuntimeError {
    /// Division by zero; the registers are left unchanged.
    #[error("cannot divide by zero in instruction {instruction}")]
    DivisionByZero { instruction: String },
    /// Jump to a label that is not assigned in the program.
    #[error("label {label} is not assigned; moving to the next address")]
    UnresolvedLabel { label: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unconstructable_message_lists_shapes_and_operands() {
        let err = TranslationError::UnconstructableInstruction {
            opcode: "add".to_string(),
            candidates: vec!["2 operands: register register".to_string()],
            supplied: vec!["EAX".to_string()],
        };
        let message = err.to_string();
        assert!(message.contains("add"));
        assert!(message.contains("2 operands: register register"));
        assert!(message.contains("EAX"));
    }

    #[test]
    fn at_line_prefixes_the_source_line() {
        let err = TranslationError::UnknownOpcode("zzz".to_string()).at_line(3);
        assert_eq!(err.to_string(), "line 3: unknown opcode: zzz");
    }
}
