//! Error types for the reindex pipeline.
//!
//! Every failure carries enough context (entity type, page offset) for an
//! operator to diagnose which page was in flight. The pipeline performs no
//! local recovery; any error aborts the run.

use thiserror::Error;

use crate::store::StoreError;
use reindexer_repository::SearchError;
use reindexer_shared::TypeDescriptor;

/// Errors that can occur during a reindex run.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// Enumerating the managed types failed; nothing was indexed.
    #[error("Metadata error: {0}")]
    MetadataError(String),

    /// Counting the rows of a type failed.
    #[error("Count error for type {entity_type}: {message}")]
    CountError {
        entity_type: TypeDescriptor,
        message: String,
    },

    /// A type's row count exceeds the range of the page-offset counter.
    #[error("Count {count} for type {entity_type} exceeds the maximum page offset")]
    CountOverflow {
        entity_type: TypeDescriptor,
        count: u64,
    },

    /// Fetching a page of rows failed.
    #[error("Fetch error for type {entity_type} at offset {offset}: {message}")]
    FetchError {
        entity_type: TypeDescriptor,
        offset: u32,
        message: String,
    },

    /// A fetched page contained an absent handle where a record was
    /// expected. Never skipped, since skipping would silently under-index.
    #[error("Absent record for type {entity_type} in page at offset {offset}")]
    NullRecord {
        entity_type: TypeDescriptor,
        offset: u32,
    },

    /// Submitting a record to the indexing sink failed.
    #[error("Submit error for type {entity_type} at offset {offset}: {source}")]
    SubmitError {
        entity_type: TypeDescriptor,
        offset: u32,
        #[source]
        source: SearchError,
    },

    /// The run was cancelled at a page boundary.
    #[error("Reindex cancelled")]
    Cancelled,
}

impl ReindexError {
    /// Create a metadata error.
    pub fn metadata(msg: impl Into<String>) -> Self {
        Self::MetadataError(msg.into())
    }

    /// Create a count error for the given type.
    pub fn count(entity_type: TypeDescriptor, source: StoreError) -> Self {
        Self::CountError {
            entity_type,
            message: source.to_string(),
        }
    }

    /// Create a fetch error for the given type and offset.
    pub fn fetch(entity_type: TypeDescriptor, offset: u32, source: StoreError) -> Self {
        Self::FetchError {
            entity_type,
            offset,
            message: source.to_string(),
        }
    }

    /// Create a submit error for the given type and offset.
    pub fn submit(entity_type: TypeDescriptor, offset: u32, source: SearchError) -> Self {
        Self::SubmitError {
            entity_type,
            offset,
            source,
        }
    }
}
