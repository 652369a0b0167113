//! Search error types.
//!
//! This module defines the error types that can occur when submitting
//! records to the search engine.

use thiserror::Error;

/// Errors that can occur during indexing sink operations.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to index a single record.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Failed to enqueue a record for asynchronous delivery.
    #[error("Queue error: {0}")]
    QueueError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a queue error.
    pub fn queue(msg: impl Into<String>) -> Self {
        Self::QueueError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }
}
