//! `out source-reg` — emits a register's value to the machine's output sink.

use super::{label_prefix, ControlFlow, Instruction};
use crate::errors::RuntimeError;
use crate::machine::Machine;
use crate::registers::Register;
use std::any::Any;
use std::fmt;

/// Emits the current value of `source` as observable output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutInstruction {
    label: Option<String>,
    source: Register,
}

impl OutInstruction {
    /// The operation name shared by all out instructions.
    pub const OP_CODE: &'static str = "out";

    /// Creates an out instruction with an optional label.
    pub fn new(label: Option<String>, source: Register) -> Self {
        Self { label, source }
    }
}

impl Instruction for OutInstruction {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn opcode(&self) -> &'static str {
        Self::OP_CODE
    }

    fn execute(&self, machine: &mut Machine) -> Result<ControlFlow, RuntimeError> {
        let value = machine.registers().get(self.source);
        machine.emit(value);
        Ok(ControlFlow::Advance)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_instruction(&self, other: &dyn Instruction) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|other| self == other)
    }
}

impl fmt::Display for OutInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}",
            label_prefix(self.label()),
            self.opcode(),
            self.source
        )
    }
}
