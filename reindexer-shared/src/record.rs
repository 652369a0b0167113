//! Materialized entity records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::TypeDescriptor;

/// One fully-materialized row from the persistence layer.
///
/// A record carries its concrete document payload with every lazy
/// association already resolved; no deferred-loading indirection leaks past
/// the persistence boundary. The driver owns a record for the duration of
/// one submission and does not retain it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    /// The row's unique identifier.
    pub record_id: Uuid,
    /// The entity type this row belongs to.
    pub entity_type: TypeDescriptor,
    /// The row's field values as a JSON document.
    pub document: Value,
    /// When the row was last modified in the store.
    pub updated_at: DateTime<Utc>,
}

impl EntityRecord {
    /// Create a record with the current time as its modification timestamp.
    pub fn new(record_id: Uuid, entity_type: TypeDescriptor, document: Value) -> Self {
        Self {
            record_id,
            entity_type,
            document,
            updated_at: Utc::now(),
        }
    }
}
