//! Translates SML source text into a program and its label table.
//!
//! One instruction per line: `[label:] opcode operand...`, whitespace
//! delimited, blank lines skipped. Translation is fail-fast: a duplicate
//! label or any construction failure rejects the whole program, never a
//! partial one.

use crate::errors::TranslationError;
use crate::labels::Labels;
use crate::program::Program;
use crate::registry::OpcodeRegistry;

const LABEL_SUFFIX: char = ':';

/// Checks if a token is a label definition (ends with `:`).
fn is_label_def(token: &str) -> bool {
    token.ends_with(LABEL_SUFFIX) && token.len() > 1
}

/// Extracts the label name from a label definition token.
fn label_name(token: &str) -> &str {
    &token[..token.len() - 1]
}

/// Translator over a fixed opcode registry.
pub struct Translator<'a> {
    registry: &'a OpcodeRegistry,
}

impl<'a> Translator<'a> {
    /// Creates a translator resolving mnemonics through `registry`.
    pub fn new(registry: &'a OpcodeRegistry) -> Self {
        Self { registry }
    }

    /// Translates `source` into a program and label table.
    ///
    /// Labels are bound to the address of the instruction they precede (its
    /// index in the program). Errors carry the 1-based source line.
    pub fn translate(&self, source: &str) -> Result<(Program, Labels), TranslationError> {
        let mut program = Program::new();
        let mut labels = Labels::new();

        for (line_index, line) in source.lines().enumerate() {
            let line_no = line_index + 1;
            let mut tokens = line.split_whitespace();

            let Some(first) = tokens.next() else {
                continue;
            };

            let (label, opcode) = if is_label_def(first) {
                let name = label_name(first);
                match tokens.next() {
                    Some(opcode) => (Some(name), opcode),
                    None => {
                        return Err(
                            TranslationError::MissingOpcode(name.to_string()).at_line(line_no)
                        );
                    }
                }
            } else {
                (None, first)
            };

            let operands: Vec<&str> = tokens.collect();
            let instruction = self
                .registry
                .construct(label, opcode, &operands)
                .map_err(|e| e.at_line(line_no))?;

            if let Some(name) = label {
                labels
                    .add_label(name, program.len())
                    .map_err(|e| e.at_line(line_no))?;
            }
            program.push(instruction);
        }

        Ok((program, labels))
    }
}
