//! Singer catalog
//!
//! Discovery produces one entry per stream with full metadata. A catalog
//! passed back with `--catalog` decides which streams and fields are synced.

mod types;

pub use types::{Catalog, CatalogEntry, Inclusion, Metadata, MetadataEntry};

use crate::error::{Error, Result};
use crate::schema::JsonSchema;
use crate::streams::{StreamDefinition, StreamRegistry};
use std::path::Path;

impl Catalog {
    /// Catalog describing every stream in `registry`, all selected by default
    pub fn discover(registry: &StreamRegistry) -> Self {
        Self {
            streams: registry.iter().map(CatalogEntry::discover).collect(),
        }
    }

    /// Load a catalog file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::catalog(format!(
                "Failed to read catalog file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&contents)
    }

    /// Parse a catalog from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::catalog(format!("Invalid catalog: {e}")))
    }

    /// Entry for `stream`
    pub fn get(&self, stream: &str) -> Option<&CatalogEntry> {
        self.streams.iter().find(|s| s.tap_stream_id == stream)
    }

    /// Whether `stream` should emit records.
    ///
    /// Explicit `selected` wins, then `selected-by-default`. Streams missing
    /// from the catalog are not selected.
    pub fn is_selected(&self, stream: &str) -> bool {
        self.get(stream)
            .and_then(CatalogEntry::root_metadata)
            .is_some_and(|m| {
                m.inclusion != Some(Inclusion::Unsupported)
                    && m.selected.or(m.selected_by_default).unwrap_or(false)
            })
    }

    /// Top-level properties explicitly deselected for `stream`.
    ///
    /// Automatic properties (keys) cannot be deselected.
    pub fn deselected_properties(&self, stream: &str) -> Vec<String> {
        let Some(entry) = self.get(stream) else {
            return vec![];
        };
        entry
            .metadata
            .iter()
            .filter(|m| m.breadcrumb.len() == 2 && m.breadcrumb[0] == "properties")
            .filter(|m| {
                m.metadata.inclusion != Some(Inclusion::Automatic)
                    && (m.metadata.selected == Some(false)
                        || m.metadata.inclusion == Some(Inclusion::Unsupported))
            })
            .map(|m| m.breadcrumb[1].clone())
            .collect()
    }

    /// Schema for `stream` from the catalog, if it parses as a JSON schema
    pub fn schema(&self, stream: &str) -> Option<JsonSchema> {
        let entry = self.get(stream)?;
        serde_json::from_value(entry.schema.clone()).ok()
    }

    /// Mark every stream selected or deselected
    pub fn select_all(&mut self, selected: bool) {
        for entry in &mut self.streams {
            entry.root_metadata_mut().selected = Some(selected);
        }
    }
}

impl CatalogEntry {
    /// Discovery entry for one stream definition
    pub fn discover(def: &StreamDefinition) -> Self {
        let schema = (def.schema)();
        let key_properties: Vec<String> =
            def.primary_keys.iter().map(|k| (*k).to_string()).collect();

        let mut metadata = vec![MetadataEntry {
            breadcrumb: vec![],
            metadata: Metadata {
                inclusion: Some(Inclusion::Available),
                selected_by_default: Some(true),
                table_key_properties: Some(key_properties.clone()),
                valid_replication_keys: def.replication_key.map(|k| vec![k.to_string()]),
                forced_replication_method: Some(def.replication_method()),
                ..Default::default()
            },
        }];

        metadata.extend(schema.properties.keys().map(|name| {
            let automatic = def.primary_keys.contains(&name.as_str())
                || def.replication_key == Some(name.as_str());
            MetadataEntry::property(
                name,
                if automatic {
                    Inclusion::Automatic
                } else {
                    Inclusion::Available
                },
            )
        }));

        Self {
            tap_stream_id: def.name.to_string(),
            stream: def.name.to_string(),
            schema: schema.to_json(),
            key_properties,
            replication_key: def.replication_key.map(str::to_string),
            replication_method: Some(def.replication_method()),
            metadata,
        }
    }
}

#[cfg(test)]
mod tests;
