//! Singer catalog types

use crate::types::{JsonObject, JsonValue, ReplicationMethod};
use serde::{Deserialize, Serialize};

/// Catalog handed to `--catalog` or printed by `--discover`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// One entry per stream
    #[serde(default)]
    pub streams: Vec<CatalogEntry>,
}

/// A stream in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Unique stream id
    pub tap_stream_id: String,

    /// Stream name
    pub stream: String,

    /// JSON schema of the records
    #[serde(default)]
    pub schema: JsonValue,

    /// Primary key properties
    #[serde(default)]
    pub key_properties: Vec<String>,

    /// Replication key, for incremental streams
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key: Option<String>,

    /// Replication method
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_method: Option<ReplicationMethod>,

    /// Breadcrumb metadata
    #[serde(default)]
    pub metadata: Vec<MetadataEntry>,
}

impl CatalogEntry {
    /// Metadata for the stream itself (empty breadcrumb)
    pub fn root_metadata(&self) -> Option<&Metadata> {
        self.metadata
            .iter()
            .find(|m| m.breadcrumb.is_empty())
            .map(|m| &m.metadata)
    }

    /// Mutable root metadata, created when absent
    pub fn root_metadata_mut(&mut self) -> &mut Metadata {
        let position = self.metadata.iter().position(|m| m.breadcrumb.is_empty());
        let idx = position.unwrap_or_else(|| {
            self.metadata.insert(0, MetadataEntry::default());
            0
        });
        &mut self.metadata[idx].metadata
    }

    /// Metadata for a top-level property
    pub fn property_metadata(&self, property: &str) -> Option<&Metadata> {
        self.metadata
            .iter()
            .find(|m| m.breadcrumb == ["properties", property])
            .map(|m| &m.metadata)
    }
}

/// Metadata attached to a breadcrumb
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataEntry {
    /// Path into the schema; empty for the stream
    #[serde(default)]
    pub breadcrumb: Vec<String>,

    /// Metadata values
    #[serde(default)]
    pub metadata: Metadata,
}

impl MetadataEntry {
    /// Entry for a top-level property
    pub fn property(name: &str, inclusion: Inclusion) -> Self {
        Self {
            breadcrumb: vec!["properties".to_string(), name.to_string()],
            metadata: Metadata {
                inclusion: Some(inclusion),
                ..Default::default()
            },
        }
    }
}

/// Whether a field or stream may be deselected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Inclusion {
    /// Always synced
    Automatic,
    /// Synced when selected
    Available,
    /// Never synced
    Unsupported,
}

/// Singer metadata keys
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inclusion: Option<Inclusion>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<bool>,

    #[serde(
        rename = "selected-by-default",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_by_default: Option<bool>,

    #[serde(
        rename = "table-key-properties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub table_key_properties: Option<Vec<String>>,

    #[serde(
        rename = "valid-replication-keys",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub valid_replication_keys: Option<Vec<String>>,

    #[serde(
        rename = "forced-replication-method",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub forced_replication_method: Option<ReplicationMethod>,

    /// Keys this tap does not interpret
    #[serde(flatten)]
    pub extra: JsonObject,
}
