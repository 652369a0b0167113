//! # Reindexer
//!
//! Main library for the full-database reindex job.
//!
//! This crate provides the invocation surface and configuration for running
//! one full reindex pass: every searchable entity type in the persistence
//! layer is walked page by page and each row is resubmitted to the search
//! engine.

pub mod config;
pub mod job;

pub use config::Dependencies;
pub use job::ReindexJob;

use thiserror::Error;

/// Errors that can occur during job initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reindex pipeline error.
    #[error("Reindex error: {0}")]
    ReindexError(#[from] reindexer_pipeline::ReindexError),

    /// Search engine error.
    #[error("Search error: {0}")]
    SearchError(#[from] reindexer_repository::SearchError),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Initialize tracing with an environment-driven filter.
///
/// Intended to be called once by the embedding application before the job
/// runs; falls back to `info` level when `RUST_LOG` is unset.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
