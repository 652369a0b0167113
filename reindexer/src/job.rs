//! The reindex job: the single invokable unit of the pipeline.

use std::sync::Arc;

use tracing::info;

use crate::IndexingError;
use reindexer_pipeline::driver::DEFAULT_PAGE_SIZE;
use reindexer_pipeline::mapping::SearchMapping;
use reindexer_pipeline::store::EntityStore;
use reindexer_pipeline::{ReindexConfig, ReindexDriver};
use reindexer_repository::IndexingSink;
use reindexer_shared::DeliveryMode;

/// Job that reindexes every searchable entity in the database.
///
/// The job takes one optional parameter, the delivery mode; everything else
/// is fixed at construction. It is intended to be invoked by an outer
/// scheduling layer (cron, manual trigger, admin endpoint).
pub struct ReindexJob {
    driver: ReindexDriver,
    delivery_mode: DeliveryMode,
}

impl ReindexJob {
    /// Create a job which reindexes all entities with synchronous delivery.
    pub fn new(
        store: Arc<dyn EntityStore>,
        mapping: Arc<dyn SearchMapping>,
        sink: Arc<dyn IndexingSink>,
    ) -> Self {
        Self::with_delivery_mode(store, mapping, sink, None)
    }

    /// Create a job with a specific delivery mode.
    ///
    /// Passing `None` selects [`DeliveryMode::Synchronous`].
    pub fn with_delivery_mode(
        store: Arc<dyn EntityStore>,
        mapping: Arc<dyn SearchMapping>,
        sink: Arc<dyn IndexingSink>,
        delivery_mode: Option<DeliveryMode>,
    ) -> Self {
        Self::with_page_size(store, mapping, sink, delivery_mode, DEFAULT_PAGE_SIZE)
    }

    /// Create a job with a specific delivery mode and page size.
    pub fn with_page_size(
        store: Arc<dyn EntityStore>,
        mapping: Arc<dyn SearchMapping>,
        sink: Arc<dyn IndexingSink>,
        delivery_mode: Option<DeliveryMode>,
        page_size: u32,
    ) -> Self {
        let delivery_mode = delivery_mode.unwrap_or_default();
        let config = ReindexConfig {
            page_size,
            delivery_mode,
        };

        Self {
            driver: ReindexDriver::with_config(store, mapping, sink, config),
            delivery_mode,
        }
    }

    /// Run one full reindex pass.
    ///
    /// Any failure aborts the run and is surfaced with the failing type and
    /// page offset in its context; the job itself performs no retries.
    pub async fn run(&self) -> Result<(), IndexingError> {
        info!(delivery_mode = %self.delivery_mode, "Starting reindex job");
        self.driver.run().await?;
        info!("Reindex job finished");
        Ok(())
    }

    /// Request cancellation; honored at the next page boundary.
    pub fn shutdown(&self) {
        self.driver.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use uuid::Uuid;

    use reindexer_pipeline::mapping::StaticSearchMapping;
    use reindexer_pipeline::store::{RecordHandle, StoreError};
    use reindexer_repository::SearchError;
    use reindexer_shared::{EntityRecord, TypeDescriptor};

    struct SingleTypeStore {
        rows: Vec<EntityRecord>,
    }

    impl SingleTypeStore {
        fn with_rows(n: usize) -> Self {
            let rows = (0..n)
                .map(|i| {
                    EntityRecord::new(
                        Uuid::new_v4(),
                        TypeDescriptor::new("article"),
                        json!({ "seq": i }),
                    )
                })
                .collect();
            Self { rows }
        }
    }

    #[async_trait]
    impl EntityStore for SingleTypeStore {
        async fn managed_types(&self) -> Result<Vec<TypeDescriptor>, StoreError> {
            Ok(vec![TypeDescriptor::new("article")])
        }

        async fn count(&self, _entity_type: &TypeDescriptor) -> Result<u64, StoreError> {
            Ok(self.rows.len() as u64)
        }

        async fn fetch(
            &self,
            _entity_type: &TypeDescriptor,
            offset: u32,
            limit: u32,
        ) -> Result<Vec<Option<RecordHandle>>, StoreError> {
            let start = (offset as usize).min(self.rows.len());
            let end = (start + limit as usize).min(self.rows.len());
            Ok(self.rows[start..end]
                .iter()
                .cloned()
                .map(|r| Some(RecordHandle::Loaded(r)))
                .collect())
        }
    }

    struct ModeRecordingSink {
        modes: Mutex<Vec<DeliveryMode>>,
    }

    #[async_trait]
    impl IndexingSink for ModeRecordingSink {
        async fn submit(
            &self,
            _record: &EntityRecord,
            mode: DeliveryMode,
        ) -> Result<(), SearchError> {
            self.modes.lock().unwrap().push(mode);
            Ok(())
        }
    }

    fn fixture(n: usize) -> (Arc<SingleTypeStore>, Arc<StaticSearchMapping>, Arc<ModeRecordingSink>) {
        (
            Arc::new(SingleTypeStore::with_rows(n)),
            Arc::new(StaticSearchMapping::from_names(["article"])),
            Arc::new(ModeRecordingSink {
                modes: Mutex::new(Vec::new()),
            }),
        )
    }

    #[tokio::test]
    async fn test_default_delivery_mode_is_synchronous() {
        let (store, mapping, sink) = fixture(3);
        let job = ReindexJob::new(store, mapping, sink.clone());

        job.run().await.unwrap();

        let modes = sink.modes.lock().unwrap().clone();
        assert_eq!(modes.len(), 3);
        assert!(modes.iter().all(|m| *m == DeliveryMode::Synchronous));
    }

    #[tokio::test]
    async fn test_none_selects_synchronous() {
        let (store, mapping, sink) = fixture(1);
        let job = ReindexJob::with_delivery_mode(store, mapping, sink.clone(), None);

        job.run().await.unwrap();

        assert_eq!(
            sink.modes.lock().unwrap().as_slice(),
            &[DeliveryMode::Synchronous]
        );
    }

    #[tokio::test]
    async fn test_explicit_asynchronous_mode() {
        let (store, mapping, sink) = fixture(2);
        let job = ReindexJob::with_delivery_mode(
            store,
            mapping,
            sink.clone(),
            Some(DeliveryMode::Asynchronous),
        );

        job.run().await.unwrap();

        let modes = sink.modes.lock().unwrap().clone();
        assert!(modes.iter().all(|m| *m == DeliveryMode::Asynchronous));
    }
}
