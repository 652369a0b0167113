//! OpenSearch sink implementation.
//!
//! This module provides the concrete implementation of `IndexingSink` using
//! the OpenSearch Rust client.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use opensearch::{
    cluster::ClusterHealthParts,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    OpenSearch, UpdateParts,
};
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::IndexingSink;
use crate::opensearch::index_config::{index_settings, IndexConfig};
use reindexer_shared::{DeliveryMode, EntityRecord};

/// OpenSearch sink implementation.
///
/// Upserts one document per record into a single shared index, keyed by
/// `{record_id}_{entity_type}`. Synchronous submissions await the engine's
/// acknowledgement; asynchronous submissions are pushed onto an internal
/// queue drained by a background worker task, which logs failures
/// out-of-band.
///
/// # Example
///
/// ```ignore
/// use reindexer_repository::{IndexConfig, OpenSearchSink};
///
/// let sink = OpenSearchSink::new("http://localhost:9200", IndexConfig::default()).await?;
/// sink.ensure_index_exists().await?;
/// sink.submit(&record, DeliveryMode::Synchronous).await?;
/// ```
pub struct OpenSearchSink {
    client: Arc<OpenSearch>,
    index_config: IndexConfig,
    queue_tx: mpsc::UnboundedSender<EntityRecord>,
}

impl OpenSearchSink {
    /// Create a new sink connected to the specified URL.
    ///
    /// Spawns the background worker that drains the asynchronous-delivery
    /// queue; the worker exits when the sink is dropped.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index configuration containing alias and version
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchSink)` - A new sink instance
    /// * `Err(SearchError)` - If connection setup fails
    pub async fn new(url: &str, index_config: IndexConfig) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = Arc::new(OpenSearch::new(transport));

        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        tokio::spawn(drain_queue(
            client.clone(),
            index_config.clone(),
            queue_rx,
        ));

        info!(
            url = %url,
            alias = %index_config.alias,
            version = index_config.version,
            "Created OpenSearch sink"
        );

        Ok(Self {
            client,
            index_config,
            queue_tx,
        })
    }

    /// Generate a document ID from a record.
    ///
    /// Uses format: `{record_id}_{entity_type}` so records of different
    /// types with colliding IDs cannot overwrite each other.
    fn document_id(record: &EntityRecord) -> String {
        format!("{}_{}", record.record_id, record.entity_type)
    }

    /// Upsert one record into the index and await acknowledgement.
    async fn upsert(
        client: &OpenSearch,
        index_config: &IndexConfig,
        record: &EntityRecord,
    ) -> Result<(), SearchError> {
        let doc_id = Self::document_id(record);

        let doc = json!({
            "record_id": record.record_id,
            "entity_type": record.entity_type.name(),
            "document": record.document,
            "updated_at": record.updated_at,
            "indexed_at": Utc::now(),
        });

        let response = client
            .update(UpdateParts::IndexId(&index_config.alias, &doc_id))
            .body(json!({
                "doc": doc,
                "doc_as_upsert": true
            }))
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Upsert request failed");
            return Err(SearchError::index(format!(
                "Upsert failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, "Record upserted");
        Ok(())
    }

    /// Ensure the record index exists with proper mappings.
    ///
    /// If the index doesn't exist, it is created under its versioned
    /// physical name with the alias attached. Intended to be called during
    /// application startup.
    pub async fn ensure_index_exists(&self) -> Result<(), SearchError> {
        let physical_name = self.index_config.physical_name();

        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[physical_name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if response.status_code().is_success() {
            debug!(index = %physical_name, "Index already exists");
            return Ok(());
        }

        let mut settings = index_settings();
        settings["aliases"] = json!({});
        settings["aliases"][self.index_config.alias.as_str()] = json!({});

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&physical_name))
            .body(settings)
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SearchError::index_creation(format!(
                "Index creation failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %physical_name, alias = %self.index_config.alias, "Created index");
        Ok(())
    }

    /// Check if the search engine is healthy and reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the cluster reports green or yellow status
    /// * `Ok(false)` - If the cluster reports red status
    /// * `Err(SearchError)` - If the health check fails to execute
    pub async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        let status = body["status"].as_str().unwrap_or("red");
        Ok(status == "green" || status == "yellow")
    }
}

#[async_trait]
impl IndexingSink for OpenSearchSink {
    async fn submit(&self, record: &EntityRecord, mode: DeliveryMode) -> Result<(), SearchError> {
        match mode {
            DeliveryMode::Synchronous => {
                Self::upsert(&self.client, &self.index_config, record).await
            }
            DeliveryMode::Asynchronous => self
                .queue_tx
                .send(record.clone())
                .map_err(|e| SearchError::queue(e.to_string())),
        }
    }
}

/// Drain the asynchronous-delivery queue.
///
/// Failures are logged with the record's identity; the worker keeps
/// draining so one bad record does not stall the queue.
async fn drain_queue(
    client: Arc<OpenSearch>,
    index_config: IndexConfig,
    mut queue_rx: mpsc::UnboundedReceiver<EntityRecord>,
) {
    while let Some(record) = queue_rx.recv().await {
        if let Err(e) = OpenSearchSink::upsert(&client, &index_config, &record).await {
            error!(
                record_id = %record.record_id,
                entity_type = %record.entity_type,
                error = %e,
                "Asynchronous submission failed"
            );
        }
    }
    debug!("Asynchronous delivery queue closed");
}
