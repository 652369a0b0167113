//! Entity type descriptors.
//!
//! A descriptor identifies one class of persisted record (a table or schema
//! analogue) and is used as the lookup key for searchability decisions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a class of record in the persistence layer.
///
/// Descriptors are discovered fresh on each pipeline run from the store's
/// live metadata; they are never persisted by the reindexer itself.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    name: String,
}

impl TypeDescriptor {
    /// Create a descriptor for the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The type's name, usable as a mapping-configuration key.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_descriptor_equality() {
        let a = TypeDescriptor::new("article");
        let b = TypeDescriptor::new("article");
        let c = TypeDescriptor::new("comment");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_descriptor_as_set_key() {
        let mut set = HashSet::new();
        set.insert(TypeDescriptor::new("article"));
        set.insert(TypeDescriptor::new("article"));

        assert_eq!(set.len(), 1);
        assert!(set.contains(&TypeDescriptor::new("article")));
    }

    #[test]
    fn test_descriptor_display() {
        let descriptor = TypeDescriptor::new("article");
        assert_eq!(descriptor.to_string(), "article");
    }
}
