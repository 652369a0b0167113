//! Configuration for the reindex job.

mod dependencies;

pub use dependencies::Dependencies;
