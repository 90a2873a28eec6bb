//! A model type's schema: an ordered field-name → declarator mapping.

use super::declarator::TypeDeclarator;

/// Ordered mapping from field name to declarator.
///
/// Declaration order is preserved and drives the order of the compiled
/// deserializer table. Re-declaring an existing key replaces the declarator
/// in place, keeping the original position (spread-and-override semantics,
/// so a subtype extending its parent can specialize inherited fields).
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<(String, TypeDeclarator)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field. Replaces in place if the key already exists.
    pub fn declare(&mut self, key: impl Into<String>, declarator: TypeDeclarator) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = declarator,
            None => self.entries.push((key, declarator)),
        }
    }

    /// Copies every entry of `parent` into this schema, in order, with the
    /// same replace-in-place rule. The parent is never modified.
    pub fn spread(&mut self, parent: &Schema) {
        for (key, declarator) in parent.iter() {
            self.declare(key, declarator.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TypeDeclarator)> {
        self.entries
            .iter()
            .map(|(key, declarator)| (key.as_str(), declarator))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
