//! Page fetcher for the reindex pipeline.
//!
//! Adapter over the entity store that turns raw row handles into
//! fully-materialized records and guards the paging counter against
//! overflow.

use std::sync::Arc;

use crate::errors::ReindexError;
use crate::store::EntityStore;
use reindexer_shared::{EntityRecord, TypeDescriptor};

/// Maximum count a type may have and still be pageable.
///
/// Pages are addressed with a `u32` offset; a count beyond this bound could
/// wrap the offset and loop forever, so it is rejected up front.
pub const MAX_OFFSET: u64 = u32::MAX as u64;

/// Fetcher that returns bounded, fully-materialized pages for one type.
pub struct PageFetcher {
    store: Arc<dyn EntityStore>,
}

impl PageFetcher {
    /// Create a fetcher over the given store.
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Total number of persisted rows of the given type at call time.
    ///
    /// # Errors
    ///
    /// * [`ReindexError::CountOverflow`] - the count exceeds [`MAX_OFFSET`];
    ///   fatal, never silently truncated
    /// * [`ReindexError::CountError`] - the store's count query failed
    pub async fn count(&self, entity_type: &TypeDescriptor) -> Result<u64, ReindexError> {
        let count = self
            .store
            .count(entity_type)
            .await
            .map_err(|e| ReindexError::count(entity_type.clone(), e))?;

        if count > MAX_OFFSET {
            return Err(ReindexError::CountOverflow {
                entity_type: entity_type.clone(),
                count,
            });
        }

        Ok(count)
    }

    /// Fetch one page of records, materializing every handle.
    ///
    /// Returns at most `limit` records starting at `offset`, in the store's
    /// order. An absent slot in the page is a [`ReindexError::NullRecord`];
    /// lazy handles are forced to their concrete records, so no
    /// deferred-loading indirection leaks past this adapter.
    pub async fn fetch_page(
        &self,
        entity_type: &TypeDescriptor,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<EntityRecord>, ReindexError> {
        let handles = self
            .store
            .fetch(entity_type, offset, limit)
            .await
            .map_err(|e| ReindexError::fetch(entity_type.clone(), offset, e))?;

        let mut records = Vec::with_capacity(handles.len());
        for handle in handles {
            let handle = handle.ok_or_else(|| ReindexError::NullRecord {
                entity_type: entity_type.clone(),
                offset,
            })?;

            let record = handle
                .materialize()
                .await
                .map_err(|e| ReindexError::fetch(entity_type.clone(), offset, e))?;
            records.push(record);
        }

        Ok(records)
    }
}
