//! Label table mapping symbolic names to program addresses.

use crate::errors::TranslationError;
use std::collections::HashMap;
use std::fmt;

/// Maps label names to program addresses.
///
/// Populated once during translation, queried by control-flow instructions at
/// run time, and cleared before each retranslation. A label name is unique
/// within one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Labels {
    labels: HashMap<String, usize>,
}

impl Labels {
    /// Creates an empty label table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `label` at the given program address.
    ///
    /// A duplicate name is rejected with [`TranslationError::DuplicateLabel`]
    /// and the table is left unchanged; the existing binding is never
    /// silently overwritten.
    pub fn add_label(&mut self, label: &str, address: usize) -> Result<(), TranslationError> {
        if self.labels.contains_key(label) {
            return Err(TranslationError::DuplicateLabel(label.to_string()));
        }
        self.labels.insert(label.to_string(), address);
        Ok(())
    }

    /// Returns the address bound to `label`, or `None` if it is not assigned.
    pub fn resolve(&self, label: &str) -> Option<usize> {
        self.labels.get(label).copied()
    }

    /// Removes every label.
    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Number of labels in the table.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True when the table holds no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl fmt::Display for Labels {
    /// Renders the table as `"[a -> 0, b -> 1]"`, sorted by label name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.labels.iter().collect();
        entries.sort_by_key(|(name, _)| name.as_str());
        let rendered = entries
            .iter()
            .map(|(name, address)| format!("{} -> {}", name, address))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "[{}]", rendered)
    }
}
