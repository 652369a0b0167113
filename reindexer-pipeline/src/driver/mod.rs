//! Reindex driver for the full-database reindex pipeline.
//!
//! Orchestrates one run: enumerate the searchable types, capture each
//! type's row count once, then page through its rows with strictly
//! increasing offsets and submit every record to the indexing sink.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::enumerator::TypeEnumerator;
use crate::errors::ReindexError;
use crate::fetcher::PageFetcher;
use crate::mapping::SearchMapping;
use crate::store::EntityStore;
use reindexer_repository::IndexingSink;
use reindexer_shared::DeliveryMode;

/// Number of rows fetched from the store per page.
pub const DEFAULT_PAGE_SIZE: u32 = 256;

/// Configuration for one reindex run.
#[derive(Debug, Clone)]
pub struct ReindexConfig {
    /// Fixed page size for the offset loop.
    pub page_size: u32,
    /// Delivery mode threaded through every submission.
    pub delivery_mode: DeliveryMode,
}

impl Default for ReindexConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            delivery_mode: DeliveryMode::Synchronous,
        }
    }
}

/// Driver that walks every searchable type and resubmits all of its rows.
///
/// The driver is strictly sequential: types are processed one after the
/// other, pages in increasing offset order, records within a page in the
/// order the fetch returned them. Parallelism, if any, lives behind the
/// sink's delivery mode, never in the driver.
///
/// Errors are never recovered locally; the first failure aborts the run
/// with the failing type and offset in its context.
pub struct ReindexDriver {
    enumerator: TypeEnumerator,
    fetcher: PageFetcher,
    sink: Arc<dyn IndexingSink>,
    config: ReindexConfig,
    cancelled: AtomicBool,
}

impl ReindexDriver {
    /// Create a driver with the default configuration (page size 256,
    /// synchronous delivery).
    pub fn new(
        store: Arc<dyn EntityStore>,
        mapping: Arc<dyn SearchMapping>,
        sink: Arc<dyn IndexingSink>,
    ) -> Self {
        Self::with_config(store, mapping, sink, ReindexConfig::default())
    }

    /// Create a driver with custom configuration.
    pub fn with_config(
        store: Arc<dyn EntityStore>,
        mapping: Arc<dyn SearchMapping>,
        sink: Arc<dyn IndexingSink>,
        config: ReindexConfig,
    ) -> Self {
        Self {
            enumerator: TypeEnumerator::new(store.clone(), mapping),
            fetcher: PageFetcher::new(store),
            sink,
            config,
            cancelled: AtomicBool::new(false),
        }
    }

    /// Run one full reindex pass over the database.
    ///
    /// For each searchable type the row count is captured once, before
    /// paging begins, and bounds the loop even if the underlying table
    /// grows or shrinks concurrently. Loop termination relies on the
    /// offset/count comparison, never on page length, so a short last page
    /// or concurrent deletions cannot stall the run.
    #[instrument(skip(self), fields(delivery_mode = %self.config.delivery_mode))]
    pub async fn run(&self) -> Result<(), ReindexError> {
        let page_size = self.config.page_size.max(1);

        let types = self.enumerator.searchable_types().await?;
        info!(type_count = types.len(), "Starting full reindex");

        for entity_type in &types {
            let total = self.fetcher.count(entity_type).await?;
            info!(entity_type = %entity_type, count = total, "Reindexing entities");

            let mut offset: u64 = 0;
            while offset < total {
                if self.cancelled.load(Ordering::SeqCst) {
                    warn!(entity_type = %entity_type, offset, "Reindex cancelled");
                    return Err(ReindexError::Cancelled);
                }

                // Lossless: total is bounded by the u32 offset range.
                let page_offset = offset as u32;
                let page = self
                    .fetcher
                    .fetch_page(entity_type, page_offset, page_size)
                    .await?;

                for record in &page {
                    self.sink
                        .submit(record, self.config.delivery_mode)
                        .await
                        .map_err(|e| {
                            ReindexError::submit(entity_type.clone(), page_offset, e)
                        })?;
                }

                offset += page_size as u64;
            }
        }

        info!(type_count = types.len(), "Full reindex complete");
        Ok(())
    }

    /// Request cancellation; honored at the next page boundary.
    ///
    /// Cancellation is sticky: a request made before `run` starts still
    /// cancels the run at its first page boundary.
    pub fn shutdown(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}
