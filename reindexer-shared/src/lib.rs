//! # Reindexer Shared
//!
//! Shared data types for the full-database reindexer: the type descriptors
//! discovered from the persistence layer, the materialized records handed to
//! the indexing sink, and the delivery mode that governs how submissions are
//! processed.

mod delivery_mode;
mod record;
mod type_descriptor;

pub use delivery_mode::DeliveryMode;
pub use record::EntityRecord;
pub use type_descriptor::TypeDescriptor;
