//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the record
//! index that the reindexer writes into.

use serde_json::{json, Value};

/// Default alias of the record index.
pub const DEFAULT_INDEX_ALIAS: &str = "records";

/// Configuration of the physical index the sink writes into.
#[derive(Debug, Clone)]
pub struct IndexConfig {
    /// The index alias used for all write operations.
    pub alias: String,
    /// The mapping version, appended to the physical index name.
    pub version: u32,
}

impl IndexConfig {
    /// Create a config for the given alias and mapping version.
    pub fn new(alias: impl Into<String>, version: u32) -> Self {
        Self {
            alias: alias.into(),
            version,
        }
    }

    /// The versioned physical index name behind the alias.
    pub fn physical_name(&self) -> String {
        format!("{}_v{}", self.alias, self.version)
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_ALIAS, 0)
    }
}

/// Get the index settings and mappings for the record index.
///
/// The configuration includes:
/// - **Keyword fields**: For filtering on record ID and entity type
/// - **Dynamic object**: The record's document payload is indexed with
///   dynamic mappings, since each entity type carries its own field set
/// - **Date field**: Indexing timestamp for diagnosing stale documents
pub fn index_settings() -> Value {
    json!({
        "settings": {
            "number_of_shards": 1,
            "number_of_replicas": 1
        },
        "mappings": {
            "properties": {
                "record_id": {
                    "type": "keyword"
                },
                "entity_type": {
                    "type": "keyword"
                },
                "document": {
                    "type": "object",
                    "dynamic": true
                },
                "updated_at": {
                    "type": "date"
                },
                "indexed_at": {
                    "type": "date"
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_settings_structure() {
        let settings = index_settings();

        assert!(settings["settings"]["number_of_shards"].is_number());
        assert!(settings["settings"]["number_of_replicas"].is_number());

        assert_eq!(
            settings["mappings"]["properties"]["record_id"]["type"],
            "keyword"
        );
        assert_eq!(
            settings["mappings"]["properties"]["entity_type"]["type"],
            "keyword"
        );
        assert_eq!(
            settings["mappings"]["properties"]["document"]["dynamic"],
            true
        );
    }

    #[test]
    fn test_physical_name() {
        let config = IndexConfig::new("records", 3);
        assert_eq!(config.physical_name(), "records_v3");
    }

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.alias, DEFAULT_INDEX_ALIAS);
        assert_eq!(config.version, 0);
    }
}
