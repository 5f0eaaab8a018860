//! `jnz test-reg target-label` — conditional jump.
//!
//! Jumps to the target label's address when the test register is nonzero.
//! An unassigned target is a runtime fault the machine treats as a
//! fall-through to the next instruction.

use super::{label_prefix, ControlFlow, Instruction};
use crate::errors::RuntimeError;
use crate::machine::Machine;
use crate::registers::Register;
use std::any::Any;
use std::fmt;

/// If `source != 0`, jump to `target`'s address; otherwise advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JnzInstruction {
    label: Option<String>,
    source: Register,
    target: String,
}

impl JnzInstruction {
    /// The operation name shared by all jnz instructions.
    pub const OP_CODE: &'static str = "jnz";

    /// Creates a jnz instruction with an optional label.
    pub fn new(label: Option<String>, source: Register, target: &str) -> Self {
        Self {
            label,
            source,
            target: target.to_string(),
        }
    }
}

impl Instruction for JnzInstruction {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn opcode(&self) -> &'static str {
        Self::OP_CODE
    }

    fn execute(&self, machine: &mut Machine) -> Result<ControlFlow, RuntimeError> {
        if machine.registers().get(self.source) == 0 {
            return Ok(ControlFlow::Advance);
        }
        match machine.labels().resolve(&self.target) {
            Some(address) => Ok(ControlFlow::Jump(address)),
            None => Err(RuntimeError::UnresolvedLabel {
                label: self.target.clone(),
            }),
        }
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

impl fmt::Display for JnzInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            label_prefix(self.label()),
            self.opcode(),
            self.source,
            self.target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Labels;
    use crate::program::Program;

    fn machine_with_label(name: &str, address: usize) -> Machine {
        let mut labels = Labels::new();
        labels.add_label(name, address).unwrap();
        Machine::new(Program::new(), labels)
    }

    #[test]
    fn zero_register_advances() {
        let mut machine = machine_with_label("a", 3);
        let instruction = JnzInstruction::new(None, Register::EAX, "a");
        assert_eq!(instruction.execute(&mut machine), Ok(ControlFlow::Advance));
    }

    #[test]
    fn nonzero_register_jumps_to_label_address() {
        let mut machine = machine_with_label("a", 3);
        machine.registers_mut().set(Register::EAX, 1);
        let instruction = JnzInstruction::new(None, Register::EAX, "a");
        assert_eq!(instruction.execute(&mut machine), Ok(ControlFlow::Jump(3)));
    }

    #[test]
    fn unresolved_target_is_a_runtime_fault() {
        let mut machine = Machine::new(Program::new(), Labels::new());
        machine.registers_mut().set(Register::EAX, 1);
        let instruction = JnzInstruction::new(None, Register::EAX, "missing");
        assert_eq!(
            instruction.execute(&mut machine),
            Err(RuntimeError::UnresolvedLabel {
                label: "missing".to_string()
            })
        );
    }

    #[test]
    fn renders_canonical_form() {
        assert_eq!(
            JnzInstruction::new(None, Register::EAX, "a").to_string(),
            "jnz EAX a"
        );
        assert_eq!(
            JnzInstruction::new(Some("loop".to_string()), Register::EAX, "a").to_string(),
            "loop: jnz EAX a"
        );
    }
}
