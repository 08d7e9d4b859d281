//! State types for tracking sync progress
//!
//! Serialized in the Singer bookmark layout:
//! `{"bookmarks": {"<stream>": {"replication_key_value": ..., "partitions": [...]}}}`

use crate::types::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Complete state for the tap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct State {
    /// Per-stream state
    #[serde(default)]
    pub bookmarks: BTreeMap<String, StreamState>,
}

impl State {
    /// Create a new empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get state for a stream
    pub fn get_stream(&self, stream: &str) -> Option<&StreamState> {
        self.bookmarks.get(stream)
    }

    /// Get mutable state for a stream, creating if needed
    pub fn get_stream_mut(&mut self, stream: &str) -> &mut StreamState {
        self.bookmarks.entry(stream.to_string()).or_default()
    }

    /// Bookmark for a stream, or for one of its partitions when `context` is set
    pub fn get_bookmark(&self, stream: &str, context: Option<&Context>) -> Option<&str> {
        let stream_state = self.get_stream(stream)?;
        match context {
            Some(ctx) => stream_state
                .get_partition(ctx)?
                .replication_key_value
                .as_deref(),
            None => stream_state.replication_key_value.as_deref(),
        }
    }

    /// Set the bookmark for a stream or partition
    pub fn set_bookmark(
        &mut self,
        stream: &str,
        context: Option<&Context>,
        replication_key: &str,
        value: String,
    ) {
        let stream_state = self.get_stream_mut(stream);
        if let Some(ctx) = context {
            let partition = stream_state.get_partition_mut(ctx);
            partition.replication_key = Some(replication_key.to_string());
            partition.replication_key_value = Some(value);
        } else {
            stream_state.replication_key = Some(replication_key.to_string());
            stream_state.replication_key_value = Some(value);
        }
    }
}

/// State for a single stream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamState {
    /// Replication key the bookmark refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key: Option<String>,

    /// Stream-level bookmark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key_value: Option<String>,

    /// One entry per context the stream was synced with
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partitions: Vec<PartitionState>,
}

impl StreamState {
    /// Create a new empty stream state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get partition state
    pub fn get_partition(&self, context: &Context) -> Option<&PartitionState> {
        self.partitions.iter().find(|p| &p.context == context)
    }

    /// Get mutable partition state, creating if needed
    pub fn get_partition_mut(&mut self, context: &Context) -> &mut PartitionState {
        let position = self.partitions.iter().position(|p| &p.context == context);
        let idx = position.unwrap_or_else(|| {
            self.partitions.push(PartitionState::new(context.clone()));
            self.partitions.len() - 1
        });
        &mut self.partitions[idx]
    }
}

/// State for a single partition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionState {
    /// Context identifying the partition
    pub context: Context,

    /// Replication key the bookmark refers to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key: Option<String>,

    /// Partition bookmark
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replication_key_value: Option<String>,
}

impl PartitionState {
    /// Create an empty partition
    pub fn new(context: Context) -> Self {
        Self {
            context,
            ..Default::default()
        }
    }
}
