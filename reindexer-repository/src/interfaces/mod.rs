//! Interface definitions for the indexing sink.
//!
//! This module defines the abstract `IndexingSink` trait that allows for
//! dependency injection and swappable search backend implementations.

mod indexing_sink;

pub use indexing_sink::IndexingSink;
