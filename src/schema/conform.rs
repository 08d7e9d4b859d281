//! Record conformance against a declared schema

use super::types::JsonSchema;
use serde_json::Value;

/// Drop top-level properties the schema does not declare.
///
/// Returns the names of the removed properties, sorted. Non-object records
/// and schemas without properties are left untouched.
pub fn conform_record(schema: &JsonSchema, record: &mut Value) -> Vec<String> {
    if schema.properties.is_empty() || schema.additional_properties == Some(true) {
        return Vec::new();
    }

    let Value::Object(map) = record else {
        return Vec::new();
    };

    let mut removed: Vec<String> = map
        .keys()
        .filter(|key| !schema.properties.contains_key(*key))
        .cloned()
        .collect();
    removed.sort();

    for key in &removed {
        map.remove(key);
    }

    removed
}
