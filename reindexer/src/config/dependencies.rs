//! Dependency initialization and wiring for the reindex job.

use std::env;
use std::sync::Arc;

use tracing::{info, warn};

use crate::job::ReindexJob;
use crate::IndexingError;
use reindexer_pipeline::driver::DEFAULT_PAGE_SIZE;
use reindexer_pipeline::mapping::{SearchMapping, StaticSearchMapping};
use reindexer_pipeline::store::EntityStore;
use reindexer_repository::{IndexConfig, IndexingSink, OpenSearchSink};
use reindexer_shared::DeliveryMode;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Container for all initialized dependencies.
///
/// The persistence layer is supplied by the embedding application; the
/// sink and searchability mapping are built from the environment.
pub struct Dependencies {
    /// The entity store to walk.
    pub store: Arc<dyn EntityStore>,
    /// The searchability oracle.
    pub mapping: Arc<dyn SearchMapping>,
    /// The indexing sink receiving every record.
    pub sink: Arc<dyn IndexingSink>,
    /// Page size for the offset loop.
    pub page_size: u32,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SEARCHABLE_TYPES`: Comma-separated entity type names to index
    /// - `REINDEX_PAGE_SIZE`: Rows fetched per page (default: 256)
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(IndexingError)` - If initialization fails
    pub async fn new(store: Arc<dyn EntityStore>) -> Result<Self, IndexingError> {
        dotenv::dotenv().ok();

        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());

        let page_size = match env::var("REINDEX_PAGE_SIZE") {
            Ok(raw) => raw.parse::<u32>().map_err(|e| {
                IndexingError::config(format!("Invalid REINDEX_PAGE_SIZE '{}': {}", raw, e))
            })?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        if page_size == 0 {
            return Err(IndexingError::config("REINDEX_PAGE_SIZE must be positive"));
        }

        let searchable: Vec<String> = env::var("SEARCHABLE_TYPES")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        if searchable.is_empty() {
            warn!("SEARCHABLE_TYPES is empty; no entity types will be reindexed");
        }

        info!(
            opensearch_url = %opensearch_url,
            page_size,
            searchable_types = searchable.len(),
            "Initializing dependencies"
        );

        let sink = OpenSearchSink::new(&opensearch_url, IndexConfig::default())
            .await
            .map_err(|e| {
                IndexingError::config(format!("Failed to create OpenSearch sink: {}", e))
            })?;

        // Verify the engine is reachable before touching the database
        let healthy = sink.health_check().await.map_err(|e| {
            IndexingError::config(format!("OpenSearch health check failed: {}", e))
        })?;
        if !healthy {
            return Err(IndexingError::config("OpenSearch cluster is unhealthy"));
        }

        sink.ensure_index_exists().await?;

        info!("OpenSearch connection verified");

        let mapping = StaticSearchMapping::from_names(searchable);

        Ok(Self {
            store,
            mapping: Arc::new(mapping),
            sink: Arc::new(sink),
            page_size,
        })
    }

    /// Build a reindex job from these dependencies.
    ///
    /// Passing `None` selects the default synchronous delivery mode.
    pub fn reindex_job(&self, delivery_mode: Option<DeliveryMode>) -> ReindexJob {
        ReindexJob::with_page_size(
            self.store.clone(),
            self.mapping.clone(),
            self.sink.clone(),
            delivery_mode,
            self.page_size,
        )
    }
}
