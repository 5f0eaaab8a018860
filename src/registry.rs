//! Opcode registry: maps mnemonics to operand signatures and builders.
//!
//! The registry decouples mnemonic strings from concrete instruction types.
//! Each mnemonic is registered with one or more operand-shape signatures and
//! a builder closure; adding a new opcode is a registration call, with no
//! change to the translator or the machine.
//!
//! Resolution is deterministic: candidates of matching arity are tried with
//! the fewest free-text operand kinds first (ties keep registration order),
//! and the first builder that coerces every operand wins. This is
//! first-match, not best-match.

use crate::errors::TranslationError;
use crate::instruction::{
    ArithmeticInstruction, ArithmeticOp, Instruction, JnzInstruction, MovInstruction,
    OutInstruction,
};
use crate::registers::Register;
use std::collections::HashMap;

/// Kind of one expected operand in a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// A register name such as `EAX`.
    Register,
    /// A signed integer literal.
    Integer,
    /// Free text, accepted as-is; used for label references.
    Text,
}

impl OperandKind {
    /// Human-readable kind name for diagnostics.
    pub const fn name(self) -> &'static str {
        match self {
            OperandKind::Register => "register",
            OperandKind::Integer => "integer",
            OperandKind::Text => "text",
        }
    }
}

/// Builder closure producing an instruction from a label and raw operand
/// tokens. A builder fails when some operand does not coerce to its expected
/// kind; the registry then tries the next candidate signature.
pub type Builder =
    Box<dyn Fn(Option<String>, &[&str]) -> Result<Box<dyn Instruction>, TranslationError>>;

/// One constructible operand shape registered for a mnemonic.
struct Signature {
    kinds: Vec<OperandKind>,
    build: Builder,
}

impl Signature {
    fn arity(&self) -> usize {
        self.kinds.len()
    }

    /// Number of free-text operand kinds; signatures with fewer are tried
    /// first to reduce accidental matches.
    fn ambiguity(&self) -> usize {
        self.kinds
            .iter()
            .filter(|kind| **kind == OperandKind::Text)
            .count()
    }

    /// Renders the expected operand kinds for diagnostics, e.g.
    /// `"2 operands: register register"`.
    fn describe(&self) -> String {
        if self.kinds.is_empty() {
            return "no operands".to_string();
        }
        let kinds = self
            .kinds
            .iter()
            .map(|kind| kind.name())
            .collect::<Vec<_>>()
            .join(" ");
        format!("{} operands: {}", self.kinds.len(), kinds)
    }
}

/// Registry of constructible instruction kinds, keyed by mnemonic.
///
/// Constructed explicitly at startup and passed by reference to the
/// translator; there is no global registration table.
pub struct OpcodeRegistry {
    opcodes: HashMap<String, Vec<Signature>>,
}

impl OpcodeRegistry {
    /// Creates a registry with no opcodes registered.
    pub fn new() -> Self {
        Self {
            opcodes: HashMap::new(),
        }
    }

    /// Creates a registry preloaded with the standard instruction set:
    /// add, sub, mul, div, mov, out, jnz.
    pub fn with_default_instruction_set() -> Self {
        let mut registry = Self::new();

        for op in [
            ArithmeticOp::Add,
            ArithmeticOp::Sub,
            ArithmeticOp::Mul,
            ArithmeticOp::Div,
        ] {
            registry.register(
                op.mnemonic(),
                &[OperandKind::Register, OperandKind::Register],
                move |label, operands| {
                    Ok(Box::new(ArithmeticInstruction::new(
                        label,
                        op,
                        parse_register(operands[0])?,
                        parse_register(operands[1])?,
                    )))
                },
            );
        }

        registry.register(
            MovInstruction::OP_CODE,
            &[OperandKind::Register, OperandKind::Integer],
            |label, operands| {
                Ok(Box::new(MovInstruction::new(
                    label,
                    parse_register(operands[0])?,
                    parse_integer(operands[1])?,
                )))
            },
        );

        registry.register(
            OutInstruction::OP_CODE,
            &[OperandKind::Register],
            |label, operands| {
                Ok(Box::new(OutInstruction::new(
                    label,
                    parse_register(operands[0])?,
                )))
            },
        );

        registry.register(
            JnzInstruction::OP_CODE,
            &[OperandKind::Register, OperandKind::Text],
            |label, operands| {
                Ok(Box::new(JnzInstruction::new(
                    label,
                    parse_register(operands[0])?,
                    operands[1],
                )))
            },
        );

        registry
    }

    /// Registers a signature and builder under `opcode`.
    ///
    /// A mnemonic may be registered repeatedly with different shapes; the
    /// registration order is part of the resolution order.
    pub fn register<F>(&mut self, opcode: &str, kinds: &[OperandKind], build: F)
    where
        F: Fn(Option<String>, &[&str]) -> Result<Box<dyn Instruction>, TranslationError> + 'static,
    {
        self.opcodes
            .entry(opcode.to_string())
            .or_default()
            .push(Signature {
                kinds: kinds.to_vec(),
                build: Box::new(build),
            });
    }

    /// True when at least one signature is registered for `opcode`.
    pub fn is_registered(&self, opcode: &str) -> bool {
        self.opcodes.contains_key(opcode)
    }

    /// Builds the instruction for `opcode` from raw operand tokens.
    ///
    /// Tries candidate signatures of matching arity in deterministic order
    /// and returns the first successful construction. When nothing matches,
    /// the error enumerates every registered shape for the opcode and the
    /// operands actually supplied.
    pub fn construct(
        &self,
        label: Option<&str>,
        opcode: &str,
        operands: &[&str],
    ) -> Result<Box<dyn Instruction>, TranslationError> {
        let signatures = self
            .opcodes
            .get(opcode)
            .ok_or_else(|| TranslationError::UnknownOpcode(opcode.to_string()))?;

        let mut candidates: Vec<&Signature> = signatures
            .iter()
            .filter(|signature| signature.arity() == operands.len())
            .collect();
        // Stable sort: fewest text operands first, registration order on ties.
        candidates.sort_by_key(|signature| signature.ambiguity());

        for signature in candidates {
            if let Ok(instruction) = (signature.build)(label.map(str::to_string), operands) {
                return Ok(instruction);
            }
        }

        Err(TranslationError::UnconstructableInstruction {
            opcode: opcode.to_string(),
            candidates: signatures.iter().map(Signature::describe).collect(),
            supplied: operands.iter().map(|token| token.to_string()).collect(),
        })
    }
}

impl Default for OpcodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerces a token to a register identifier.
pub fn parse_register(token: &str) -> Result<Register, TranslationError> {
    token.parse()
}

/// Coerces a token to a signed integer literal.
pub fn parse_integer(token: &str) -> Result<i64, TranslationError> {
    token
        .parse::<i64>()
        .map_err(|_| TranslationError::ExpectedInteger {
            token: token.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> OpcodeRegistry {
        OpcodeRegistry::with_default_instruction_set()
    }

    #[test]
    fn default_set_is_registered() {
        let registry = registry();
        for opcode in ["add", "sub", "mul", "div", "mov", "out", "jnz"] {
            assert!(registry.is_registered(opcode), "{opcode} missing");
        }
        assert!(!registry.is_registered("zzz"));
    }

    #[test]
    fn construct_then_render_round_trips() {
        let registry = registry();
        let cases = [
            (None, "add", vec!["EAX", "EBX"], "add EAX EBX"),
            (None, "sub", vec!["ECX", "EDX"], "sub ECX EDX"),
            (None, "mul", vec!["ESI", "EDI"], "mul ESI EDI"),
            (None, "div", vec!["ESP", "EBP"], "div ESP EBP"),
            (None, "mov", vec!["EAX", "1"], "mov EAX 1"),
            (Some("x"), "mov", vec!["EAX", "1"], "x: mov EAX 1"),
            (None, "out", vec!["EBX"], "out EBX"),
            (None, "jnz", vec!["EAX", "a"], "jnz EAX a"),
        ];
        for (label, opcode, operands, rendered) in cases {
            let instruction = registry.construct(label, opcode, &operands).unwrap();
            assert_eq!(instruction.to_string(), rendered);
        }
    }

    #[test]
    fn unknown_opcode_rejected() {
        let err = registry().construct(None, "zzz", &["EAX"]).unwrap_err();
        assert_eq!(err, TranslationError::UnknownOpcode("zzz".to_string()));
    }

    #[test]
    fn arity_mismatch_lists_registered_shapes() {
        let err = registry().construct(None, "add", &["EAX"]).unwrap_err();
        match &err {
            TranslationError::UnconstructableInstruction {
                opcode,
                candidates,
                supplied,
            } => {
                assert_eq!(opcode, "add");
                assert_eq!(candidates, &vec!["2 operands: register register".to_string()]);
                assert_eq!(supplied, &vec!["EAX".to_string()]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_register_name_fails_construction() {
        let err = registry()
            .construct(None, "add", &["EAX", "nope"])
            .unwrap_err();
        assert!(matches!(
            err,
            TranslationError::UnconstructableInstruction { .. }
        ));
    }

    #[test]
    fn non_integer_literal_fails_construction() {
        let err = registry()
            .construct(None, "mov", &["EAX", "one"])
            .unwrap_err();
        assert!(matches!(
            err,
            TranslationError::UnconstructableInstruction { .. }
        ));
    }

    #[test]
    fn fewest_text_kinds_tried_first() {
        // Same arity, one signature more specific than the other. A register
        // token must resolve through the register signature even when the
        // text signature was registered first.
        let mut registry = OpcodeRegistry::new();
        registry.register("tst", &[OperandKind::Text], |label, operands| {
            Ok(Box::new(JnzInstruction::new(
                label,
                Register::EAX,
                operands[0],
            )))
        });
        registry.register("tst", &[OperandKind::Register], |label, operands| {
            Ok(Box::new(OutInstruction::new(
                label,
                parse_register(operands[0])?,
            )))
        });

        let instruction = registry.construct(None, "tst", &["EAX"]).unwrap();
        assert_eq!(instruction.to_string(), "out EAX");

        let instruction = registry.construct(None, "tst", &["loop"]).unwrap();
        assert_eq!(instruction.to_string(), "jnz EAX loop");
    }

    #[test]
    fn first_match_wins_in_registration_order() {
        // Two equally ambiguous signatures: the one registered first is
        // chosen, not the "best" one.
        let mut registry = OpcodeRegistry::new();
        registry.register("tst", &[OperandKind::Text], |label, operands| {
            Ok(Box::new(JnzInstruction::new(
                label,
                Register::EAX,
                operands[0],
            )))
        });
        registry.register("tst", &[OperandKind::Text], |label, operands| {
            Ok(Box::new(JnzInstruction::new(
                label,
                Register::EBX,
                operands[0],
            )))
        });

        let instruction = registry.construct(None, "tst", &["a"]).unwrap();
        assert_eq!(instruction.to_string(), "jnz EAX a");
    }

    #[test]
    fn extension_requires_only_a_registration() {
        // A new opcode built from existing instruction types: no translator
        // or machine change involved.
        let mut registry = OpcodeRegistry::with_default_instruction_set();
        registry.register(
            "zero",
            &[OperandKind::Register],
            |label, operands| {
                Ok(Box::new(MovInstruction::new(
                    label,
                    parse_register(operands[0])?,
                    0,
                )))
            },
        );

        let instruction = registry.construct(None, "zero", &["ECX"]).unwrap();
        assert_eq!(instruction.to_string(), "mov ECX 0");
    }
}
