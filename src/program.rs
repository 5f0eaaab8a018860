//! An ordered sequence of instructions; position is the instruction's address.

use crate::instruction::Instruction;
use std::fmt;

/// A translated program.
///
/// Appended to only during translation; read-only during execution. The
/// index of an instruction is its address, used by jumps and by label
/// resolution.
#[derive(Debug, Default)]
pub struct Program {
    instructions: Vec<Box<dyn Instruction>>,
}

impl Program {
    /// Creates an empty program.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an instruction; its address is the index it lands at.
    pub fn push(&mut self, instruction: Box<dyn Instruction>) {
        self.instructions.push(instruction);
    }

    /// Returns the instruction at `address`, or `None` past the end.
    pub fn get(&self, address: usize) -> Option<&dyn Instruction> {
        self.instructions.get(address).map(Box::as_ref)
    }

    /// Number of instructions in the program.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// True when the program holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Iterates over the instructions in address order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Instruction> {
        self.instructions.iter().map(Box::as_ref)
    }
}

impl PartialEq for Program {
    /// Programs are equal when their instructions are structurally equal,
    /// address for address.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| a.eq_instruction(b))
    }
}

impl fmt::Display for Program {
    /// Renders one instruction per line in canonical form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for instruction in self.iter() {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}
