//! Searchability mapping.
//!
//! Decides, per entity type, whether the type participates in search
//! indexing. The decision is externally configured; the pipeline consults
//! the oracle once per type per run.

use std::collections::HashSet;

use reindexer_shared::TypeDescriptor;

/// Oracle answering whether an entity type is searchable.
pub trait SearchMapping: Send + Sync {
    /// Whether rows of the given type should be indexed.
    fn is_searchable(&self, entity_type: &TypeDescriptor) -> bool;
}

/// Mapping backed by a configured set of type names.
///
/// The name set typically comes from application configuration (e.g., the
/// `SEARCHABLE_TYPES` environment variable in the wiring layer).
#[derive(Debug, Clone, Default)]
pub struct StaticSearchMapping {
    searchable: HashSet<String>,
}

impl StaticSearchMapping {
    /// Create a mapping from the given searchable type names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            searchable: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of configured searchable types.
    pub fn len(&self) -> usize {
        self.searchable.len()
    }

    /// Whether no types are configured as searchable.
    pub fn is_empty(&self) -> bool {
        self.searchable.is_empty()
    }
}

impl SearchMapping for StaticSearchMapping {
    fn is_searchable(&self, entity_type: &TypeDescriptor) -> bool {
        self.searchable.contains(entity_type.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_type_is_searchable() {
        let mapping = StaticSearchMapping::from_names(["article", "comment"]);

        assert!(mapping.is_searchable(&TypeDescriptor::new("article")));
        assert!(mapping.is_searchable(&TypeDescriptor::new("comment")));
        assert!(!mapping.is_searchable(&TypeDescriptor::new("audit_log")));
    }

    #[test]
    fn test_empty_mapping() {
        let mapping = StaticSearchMapping::default();

        assert!(mapping.is_empty());
        assert!(!mapping.is_searchable(&TypeDescriptor::new("article")));
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let mapping = StaticSearchMapping::from_names(["article", "article"]);
        assert_eq!(mapping.len(), 1);
    }
}
