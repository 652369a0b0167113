//! Persistence-layer boundary.
//!
//! This module defines the abstract interface over the relational entity
//! store: type metadata, per-type row counts, and offset-addressed page
//! fetches. Rows come back as [`RecordHandle`]s, which may still be lazy;
//! materialization happens in the page fetcher, never in the driver.

use async_trait::async_trait;
use thiserror::Error;

use reindexer_shared::{EntityRecord, TypeDescriptor};

/// Errors surfaced by the persistence layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Retrieving the type metadata failed.
    #[error("Metadata error: {0}")]
    MetadataError(String),

    /// Counting the rows of a type failed.
    #[error("Count error: {0}")]
    CountError(String),

    /// Fetching a page of rows failed.
    #[error("Fetch error: {0}")]
    FetchError(String),

    /// Loading a lazy handle's underlying record failed.
    #[error("Load error: {0}")]
    LoadError(String),
}

impl StoreError {
    /// Create a metadata error.
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::MetadataError(msg.into())
    }

    /// Create a count error.
    pub fn count(msg: impl Into<String>) -> Self {
        Self::CountError(msg.into())
    }

    /// Create a fetch error.
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::FetchError(msg.into())
    }

    /// Create a load error.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::LoadError(msg.into())
    }
}

/// A deferred row whose concrete value is loaded on demand.
///
/// Stores that hand out lazy references implement this to resolve the
/// reference against the live store, typically performing I/O.
#[async_trait]
pub trait LazyRecord: Send {
    /// Load the underlying concrete record, consuming the handle.
    async fn load(self: Box<Self>) -> Result<EntityRecord, StoreError>;
}

/// A row handle as returned by the store, possibly still lazy.
pub enum RecordHandle {
    /// A fully-loaded row.
    Loaded(EntityRecord),
    /// A deferred row, resolved on demand against the store.
    Proxy(Box<dyn LazyRecord>),
}

impl RecordHandle {
    /// Force the handle into its concrete, fully-resolved record.
    ///
    /// Loaded handles pass through unchanged; proxy handles are replaced by
    /// their underlying implementation. After this call no deferred-loading
    /// indirection remains.
    pub async fn materialize(self) -> Result<EntityRecord, StoreError> {
        match self {
            Self::Loaded(record) => Ok(record),
            Self::Proxy(lazy) => lazy.load().await,
        }
    }
}

impl std::fmt::Debug for RecordHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded(record) => f.debug_tuple("Loaded").field(&record.record_id).finish(),
            Self::Proxy(_) => f.debug_tuple("Proxy").finish(),
        }
    }
}

/// Abstract interface over the relational entity store.
///
/// The store is an external, shared, mutable resource; the pipeline makes
/// no locking or transactional claim over it and tolerates concurrent
/// writers during a run.
///
/// # Ordering
///
/// `fetch` must return a stable order for a fixed (type, offset, limit) as
/// long as the store is not mutated between calls; no ordering guarantee is
/// required across mutations.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// List all entity types known to the store's metadata.
    async fn managed_types(&self) -> Result<Vec<TypeDescriptor>, StoreError>;

    /// Total number of persisted rows of the given type at call time.
    async fn count(&self, entity_type: &TypeDescriptor) -> Result<u64, StoreError>;

    /// Fetch one ordered page of row handles for the given type.
    ///
    /// Returns at most `limit` slots starting at `offset`. A slot is `None`
    /// when a row was expected but absent (e.g., a dangling reference);
    /// callers must treat such a slot as an error, never skip it.
    async fn fetch(
        &self,
        entity_type: &TypeDescriptor,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Option<RecordHandle>>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use uuid::Uuid;

    struct LazyFixture {
        record: EntityRecord,
    }

    #[async_trait]
    impl LazyRecord for LazyFixture {
        async fn load(self: Box<Self>) -> Result<EntityRecord, StoreError> {
            Ok(self.record)
        }
    }

    struct FailingLazy;

    #[async_trait]
    impl LazyRecord for FailingLazy {
        async fn load(self: Box<Self>) -> Result<EntityRecord, StoreError> {
            Err(StoreError::load("row vanished"))
        }
    }

    #[tokio::test]
    async fn test_materialize_loaded_handle() {
        let record = EntityRecord::new(
            Uuid::new_v4(),
            TypeDescriptor::new("article"),
            json!({ "title": "Loaded" }),
        );

        let materialized = RecordHandle::Loaded(record.clone())
            .materialize()
            .await
            .unwrap();

        assert_eq!(materialized, record);
    }

    #[tokio::test]
    async fn test_materialize_proxy_handle() {
        let record = EntityRecord::new(
            Uuid::new_v4(),
            TypeDescriptor::new("article"),
            json!({ "title": "Deferred" }),
        );

        let handle = RecordHandle::Proxy(Box::new(LazyFixture {
            record: record.clone(),
        }));

        let materialized = handle.materialize().await.unwrap();
        assert_eq!(materialized, record);
    }

    #[tokio::test]
    async fn test_materialize_proxy_failure() {
        let handle = RecordHandle::Proxy(Box::new(FailingLazy));

        let result = handle.materialize().await;
        assert!(matches!(result, Err(StoreError::LoadError(_))));
    }
}
