//! # Reindexer Pipeline
//!
//! This crate provides the core of the full-database reindex pipeline:
//! walking every searchable entity type in the persistence layer, paging
//! through its rows, and submitting each row to the indexing sink.
//!
//! ## Architecture
//!
//! The pipeline is three cooperating roles around the external sink:
//!
//! 1. **Type Enumerator**: Lists managed types and filters to the
//!    searchable subset
//! 2. **Page Fetcher**: Fetches bounded, fully-materialized pages of rows
//!    for one type
//! 3. **Reindex Driver**: Orchestrates the paged traversal and submission
//!    loop

pub mod driver;
pub mod enumerator;
pub mod errors;
pub mod fetcher;
pub mod mapping;
pub mod store;

pub use driver::{ReindexConfig, ReindexDriver};
pub use errors::ReindexError;
