//! Type enumerator for the reindex pipeline.
//!
//! Lists all entity types known to the store's metadata and filters them to
//! the searchable subset.

use std::sync::Arc;

use tracing::debug;

use crate::errors::ReindexError;
use crate::mapping::SearchMapping;
use crate::store::EntityStore;
use reindexer_shared::TypeDescriptor;

/// Enumerator that discovers the searchable entity types for one run.
///
/// The enumerator mutates nothing and is deterministic for a stable
/// metadata snapshot. A metadata failure is fatal for the whole run; there
/// is no partial enumeration.
pub struct TypeEnumerator {
    store: Arc<dyn EntityStore>,
    mapping: Arc<dyn SearchMapping>,
}

impl TypeEnumerator {
    /// Create an enumerator over the given store and mapping oracle.
    pub fn new(store: Arc<dyn EntityStore>, mapping: Arc<dyn SearchMapping>) -> Self {
        Self { store, mapping }
    }

    /// List the managed types that are configured as searchable.
    ///
    /// The mapping oracle is consulted exactly once per managed type.
    pub async fn searchable_types(&self) -> Result<Vec<TypeDescriptor>, ReindexError> {
        let managed = self
            .store
            .managed_types()
            .await
            .map_err(|e| ReindexError::metadata(e.to_string()))?;

        let managed_count = managed.len();
        let searchable: Vec<TypeDescriptor> = managed
            .into_iter()
            .filter(|t| self.mapping.is_searchable(t))
            .collect();

        debug!(
            managed = managed_count,
            searchable = searchable.len(),
            "Enumerated entity types"
        );

        Ok(searchable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use crate::mapping::StaticSearchMapping;
    use crate::store::{RecordHandle, StoreError};

    struct FixedStore {
        types: Vec<&'static str>,
        fail_metadata: bool,
    }

    #[async_trait]
    impl EntityStore for FixedStore {
        async fn managed_types(&self) -> Result<Vec<TypeDescriptor>, StoreError> {
            if self.fail_metadata {
                return Err(StoreError::metadata("metamodel unavailable"));
            }
            Ok(self.types.iter().copied().map(TypeDescriptor::new).collect())
        }

        async fn count(&self, _entity_type: &TypeDescriptor) -> Result<u64, StoreError> {
            Ok(0)
        }

        async fn fetch(
            &self,
            _entity_type: &TypeDescriptor,
            _offset: u32,
            _limit: u32,
        ) -> Result<Vec<Option<RecordHandle>>, StoreError> {
            Ok(vec![])
        }
    }

    #[tokio::test]
    async fn test_filters_to_searchable_subset() {
        let store = Arc::new(FixedStore {
            types: vec!["article", "audit_log", "comment"],
            fail_metadata: false,
        });
        let mapping = Arc::new(StaticSearchMapping::from_names(["article", "comment"]));
        let enumerator = TypeEnumerator::new(store, mapping);

        let types = enumerator.searchable_types().await.unwrap();

        assert_eq!(
            types,
            vec![TypeDescriptor::new("article"), TypeDescriptor::new("comment")]
        );
    }

    #[tokio::test]
    async fn test_metadata_failure_is_fatal() {
        let store = Arc::new(FixedStore {
            types: vec![],
            fail_metadata: true,
        });
        let mapping = Arc::new(StaticSearchMapping::from_names(["article"]));
        let enumerator = TypeEnumerator::new(store, mapping);

        let result = enumerator.searchable_types().await;

        assert!(matches!(result, Err(ReindexError::MetadataError(_))));
    }

    #[tokio::test]
    async fn test_no_searchable_types() {
        let store = Arc::new(FixedStore {
            types: vec!["audit_log"],
            fail_metadata: false,
        });
        let mapping = Arc::new(StaticSearchMapping::default());
        let enumerator = TypeEnumerator::new(store, mapping);

        let types = enumerator.searchable_types().await.unwrap();
        assert!(types.is_empty());
    }
}
