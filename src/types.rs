//! Common types used throughout the tap
//!
//! Shared type aliases and small enums used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Partition context handed from a parent stream to its children.
///
/// Ordered so that two equal contexts always serialize identically.
pub type Context = BTreeMap<String, JsonValue>;

// ============================================================================
// Replication Method
// ============================================================================

/// How a stream is replicated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReplicationMethod {
    /// Fetch everything every run
    #[default]
    FullTable,
    /// Only fetch records modified after the bookmark
    Incremental,
}

// ============================================================================
// Utilities
// ============================================================================

/// Render a JSON scalar as a plain string (strings unquoted)
pub fn value_to_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
