//! Decoder trait

use crate::error::Result;
use serde_json::Value;

/// Pulls records out of a response
pub trait RecordDecoder: Send + Sync {
    /// Extract records from a parsed response body
    fn decode_value(&self, body: &Value) -> Result<Vec<Value>>;
}
