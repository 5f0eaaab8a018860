//! `mov dest-reg literal` — loads an integer literal into a register.

use super::{label_prefix, ControlFlow, Instruction};
use crate::errors::RuntimeError;
use crate::machine::Machine;
use crate::registers::Register;
use std::any::Any;
use std::fmt;

/// `dest <- value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovInstruction {
    label: Option<String>,
    dest: Register,
    value: i64,
}

impl MovInstruction {
    /// The operation name shared by all mov instructions.
    pub const OP_CODE: &'static str = "mov";

    /// Creates a mov instruction with an optional label.
    pub fn new(label: Option<String>, dest: Register, value: i64) -> Self {
        Self { label, dest, value }
    }
}

impl Instruction for MovInstruction {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn opcode(&self) -> &'static str {
        Self::OP_CODE
    }

    fn execute(&self, machine: &mut Machine) -> Result<ControlFlow, RuntimeError> {
        machine.registers_mut().set(self.dest, self.value);
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

impl fmt::Display for MovInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            label_prefix(self.label()),
            self.opcode(),
            self.dest,
            self.value
        )
    }
}
