//! OpenSearch implementation of the indexing sink.
//!
//! This module provides a concrete implementation of `IndexingSink` using
//! OpenSearch as the backend.

mod client;
mod index_config;

pub use client::OpenSearchSink;
pub use index_config::IndexConfig;
