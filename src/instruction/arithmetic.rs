//! Two-register arithmetic instructions: add, sub, mul, div.
//!
//! All four share one operand shape (`result-reg, source-reg`) and one
//! execution skeleton, so they are a single instruction type parameterized by
//! operator. Arithmetic wraps on overflow rather than panicking. Division by
//! zero is a non-fatal runtime fault: the registers stay unchanged and the
//! machine advances sequentially.

use super::{label_prefix, ControlFlow, Instruction};
use crate::errors::RuntimeError;
use crate::machine::Machine;
use crate::registers::Register;
use std::any::Any;
use std::fmt;

/// Operator applied by an [`ArithmeticInstruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithmeticOp {
    /// Returns the assembly mnemonic for this operator.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "add",
            ArithmeticOp::Sub => "sub",
            ArithmeticOp::Mul => "mul",
            ArithmeticOp::Div => "div",
        }
    }

    /// Applies the operator with wrapping semantics.
    ///
    /// `Div` must not be called with a zero divisor; `execute` checks first.
    fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            ArithmeticOp::Add => lhs.wrapping_add(rhs),
            ArithmeticOp::Sub => lhs.wrapping_sub(rhs),
            ArithmeticOp::Mul => lhs.wrapping_mul(rhs),
            ArithmeticOp::Div => lhs.wrapping_div(rhs),
        }
    }
}

/// `result <- result op source`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArithmeticInstruction {
    label: Option<String>,
    op: ArithmeticOp,
    result: Register,
    source: Register,
}

impl ArithmeticInstruction {
    /// Creates an arithmetic instruction with an optional label.
    pub fn new(
        label: Option<String>,
        op: ArithmeticOp,
        result: Register,
        source: Register,
    ) -> Self {
        Self {
            label,
            op,
            result,
            source,
        }
    }
}

impl Instruction for ArithmeticInstruction {
    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn opcode(&self) -> &'static str {
        self.op.mnemonic()
    }

    fn execute(&self, machine: &mut Machine) -> Result<ControlFlow, RuntimeError> {
        let lhs = machine.registers().get(self.result);
        let rhs = machine.registers().get(self.source);

        if self.op == ArithmeticOp::Div && rhs == 0 {
            return Err(RuntimeError::DivisionByZero {
                instruction: self.to_string(),
            });
        }

        machine.registers_mut().set(self.result, self.op.apply(lhs, rhs));
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

impl fmt::Display for ArithmeticInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {} {}",
            label_prefix(self.label()),
            self.opcode(),
            self.result,
            self.source
        )
    }
}
