//! # Reindexer Repository
//!
//! This crate provides the indexing sink boundary for the full-database
//! reindexer. It includes the error taxonomy, the abstract `IndexingSink`
//! trait, and a concrete implementation for OpenSearch.

pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use errors::SearchError;
pub use interfaces::IndexingSink;
pub use opensearch::{IndexConfig, OpenSearchSink};
