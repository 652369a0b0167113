//! Indexing sink trait definition.
//!
//! This module defines the abstract interface that receives materialized
//! records from the reindex driver, allowing for different backend
//! implementations (OpenSearch, Elasticsearch, mocks, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use reindexer_shared::{DeliveryMode, EntityRecord};

/// Abstract interface for submitting records to the search engine.
///
/// The driver hands each materialized record to the sink exactly once per
/// pipeline run, together with the delivery mode chosen for that run.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait IndexingSink: Send + Sync {
    /// Submit one record for indexing under the given delivery mode.
    ///
    /// Under [`DeliveryMode::Synchronous`] the returned future resolves only
    /// once the search engine has acknowledged (or rejected) the write.
    /// Under [`DeliveryMode::Asynchronous`] the record is enqueued and the
    /// future resolves immediately; completion or failure of the underlying
    /// write is observed out-of-band by the sink, not by the caller.
    ///
    /// # Arguments
    ///
    /// * `record` - The fully-materialized record to upsert
    /// * `mode` - The delivery mode for this pipeline run
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The write was acknowledged (synchronous) or enqueued
    ///   (asynchronous)
    /// * `Err(SearchError)` - The write or enqueue failed
    async fn submit(&self, record: &EntityRecord, mode: DeliveryMode) -> Result<(), SearchError>;
}
