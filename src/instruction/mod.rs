//! The instruction model: polymorphic operations executed by the machine.
//!
//! Every instruction is an immutable value built by the opcode registry
//! during translation. Executing it either advances the program counter or
//! redirects it ([`ControlFlow`]); rendering it produces the canonical
//! `"[label: ]opcode operand operand..."` form used for diagnostics and
//! round-trip tests. Equality is structural across instruction kinds, which
//! is what lets whole programs be compared in tests.

pub mod arithmetic;
pub mod jnz;
pub mod mov;
pub mod out;

pub use arithmetic::{ArithmeticInstruction, ArithmeticOp};
pub use jnz::JnzInstruction;
pub use mov::MovInstruction;
pub use out::OutInstruction;

use crate::errors::RuntimeError;
use crate::machine::Machine;
use std::any::Any;
use std::fmt;

/// Where the program counter goes after an instruction executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    /// Move on to the instruction at the next address.
    Advance,
    /// Jump to the given program address.
    Jump(usize),
}

/// A single machine operation.
///
/// Implementations are constructed once by the opcode registry and never
/// mutated. A runtime fault returned from [`execute`](Instruction::execute)
/// is a diagnostic, not a halt: the machine reports it and advances.
pub trait Instruction: fmt::Debug + fmt::Display {
    /// The optional label naming this instruction's address.
    fn label(&self) -> Option<&str>;

    /// The mnemonic identifying this instruction's operation.
    fn opcode(&self) -> &'static str;

    /// Executes the instruction against the machine, returning the
    /// program-counter directive.
    fn execute(&self, machine: &mut Machine) -> Result<ControlFlow, RuntimeError>;

    /// Upcast used for structural equality across `dyn Instruction`.
    fn as_any(&self) -> &dyn Any;

    /// Structural equality: same kind, same label, same operands.
    fn eq_instruction(&self, other: &dyn Instruction) -> bool;
}

/// Renders the `"label: "` prefix of the canonical instruction form, or an
/// empty string for unlabeled instructions.
pub(crate) fn label_prefix(label: Option<&str>) -> String {
    match label {
        Some(label) => format!("{label}: "),
        None => String::new(),
    }
}
