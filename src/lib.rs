//! A Simple Machine Language (SML) interpreter.
//!
//! Translates line-oriented SML source into typed instructions, resolves
//! labels to instruction addresses, and executes the program on a register
//! machine. The instruction set is extensible through the opcode registry:
//! new mnemonics are a registration call, not a translator change.

pub mod errors;
pub mod instruction;
pub mod labels;
pub mod machine;
pub mod program;
pub mod registers;
pub mod registry;
pub mod translator;
pub mod utils;
