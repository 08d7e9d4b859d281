//! State manager implementation
//!
//! Holds the bookmarks for a run. Singer taps never write state themselves;
//! the current state is emitted as a `STATE` message instead.

use super::types::State;
use crate::dates::infer_date;
use crate::error::{Error, Result};
use crate::types::{Context, JsonValue};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// State manager for the bookmarks of one run
#[derive(Debug, Clone, Default)]
pub struct StateManager {
    state: Arc<RwLock<State>>,
}

impl StateManager {
    /// Create an empty state manager
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Wrap an existing state
    pub fn with_state(state: State) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Load state from a `--state` file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| Error::State {
            message: format!("Failed to read state file {}: {e}", path.display()),
        })?;
        Self::from_json(&contents)
    }

    /// Create a state manager from inline JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::in_memory());
        }
        let value: JsonValue = serde_json::from_str(json).map_err(|e| Error::State {
            message: format!("Failed to parse state JSON: {e}"),
        })?;
        Self::from_value(value)
    }

    /// Create a state manager from a JSON value.
    ///
    /// A full `STATE` message (`{"type": "STATE", "value": {...}}`) is accepted too.
    pub fn from_value(value: JsonValue) -> Result<Self> {
        let value = match value {
            JsonValue::Object(mut map)
                if !map.contains_key("bookmarks") && map.contains_key("value") =>
            {
                map.remove("value").unwrap_or_default()
            }
            other => other,
        };

        let state: State = serde_json::from_value(value).map_err(|e| Error::State {
            message: format!("Invalid state: {e}"),
        })?;
        Ok(Self::with_state(state))
    }

    /// Get a read lock on the current state
    pub async fn state(&self) -> tokio::sync::RwLockReadGuard<'_, State> {
        self.state.read().await
    }

    /// Stored bookmark for a stream or partition
    pub async fn starting_value(&self, stream: &str, context: Option<&Context>) -> Option<String> {
        let state = self.state.read().await;
        state.get_bookmark(stream, context).map(ToString::to_string)
    }

    /// Move the bookmark forward to `value` if it is newer.
    ///
    /// Returns whether the bookmark changed.
    pub async fn advance(
        &self,
        stream: &str,
        context: Option<&Context>,
        replication_key: &str,
        value: &str,
    ) -> bool {
        let mut state = self.state.write().await;
        let current = state.get_bookmark(stream, context);

        if current.is_some_and(|current| !is_newer(value, current)) {
            return false;
        }

        debug!(stream, ?context, value, "Advancing bookmark");
        state.set_bookmark(stream, context, replication_key, value.to_string());
        true
    }

    /// Export state as a JSON value
    pub async fn to_value(&self) -> Result<JsonValue> {
        let state = self.state.read().await;
        serde_json::to_value(&*state).map_err(|e| Error::State {
            message: format!("Failed to serialize state: {e}"),
        })
    }

    /// Export state as JSON string
    pub async fn to_json(&self) -> Result<String> {
        let state = self.state.read().await;
        serde_json::to_string(&*state).map_err(|e| Error::State {
            message: format!("Failed to serialize state: {e}"),
        })
    }
}

/// Whether `candidate` sorts after `current`.
///
/// Timestamps are compared as instants so differing offsets order correctly;
/// anything unparseable falls back to string order.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    match (infer_date(candidate), infer_date(current)) {
        (Ok(a), Ok(b)) => a > b,
        _ => candidate > current,
    }
}
