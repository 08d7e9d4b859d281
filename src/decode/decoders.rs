//! JSON decoder

use super::types::RecordDecoder;
use crate::error::{Error, Result};
use serde_json::Value;

/// JSON decoder with optional record path extraction
#[derive(Debug, Clone, Default)]
pub struct JsonDecoder {
    /// JSONPath to extract records
    record_path: Option<String>,
}

impl JsonDecoder {
    /// Create a new JSON decoder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JSON decoder with a record path
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            record_path: Some(path.into()),
        }
    }

    /// Extract records from a JSON value using a path
    fn extract_records(&self, value: &Value) -> Result<Vec<Value>> {
        let records = match &self.record_path {
            // Wildcards go through jsonpath-rust, plain paths are walked directly
            Some(path) if path.contains('*') => extract_with_jsonpath(value, path)?,
            Some(path) => match extract_simple_path(value, path) {
                Some(Value::Array(arr)) => arr,
                Some(v) => vec![v],
                None => vec![],
            },
            None => match value {
                Value::Array(arr) => arr.clone(),
                _ => vec![value.clone()],
            },
        };

        Ok(records.into_iter().filter(|r| !r.is_null()).collect())
    }
}

impl RecordDecoder for JsonDecoder {
    fn decode_value(&self, body: &Value) -> Result<Vec<Value>> {
        self.extract_records(body)
    }
}

/// Walk a dotted path such as `$.salesorder` or `$.data.items`
fn extract_simple_path(value: &Value, path: &str) -> Option<Value> {
    let path = path.strip_prefix('$').unwrap_or(path);
    let path = path.strip_prefix('.').unwrap_or(path);
    if path.is_empty() {
        return Some(value.clone());
    }

    let mut current = value;
    for part in path.split('.') {
        if let Some(bracket_pos) = part.find('[') {
            let name = &part[..bracket_pos];
            let index_str = part[bracket_pos + 1..].trim_end_matches(']');

            if !name.is_empty() {
                current = current.get(name)?;
            }
            current = current.get(index_str.parse::<usize>().ok()?)?;
        } else {
            current = current.get(part)?;
        }
    }

    Some(current.clone())
}

/// Extract records using jsonpath-rust
fn extract_with_jsonpath(value: &Value, path: &str) -> Result<Vec<Value>> {
    use jsonpath_rust::JsonPath;

    let jp = JsonPath::try_from(path).map_err(|e| Error::JsonPath {
        message: format!("Invalid JSONPath: {e}"),
    })?;

    match jp.find(value) {
        Value::Array(arr) => Ok(arr),
        Value::Null => Ok(vec![]),
        other => Ok(vec![other]),
    }
}
