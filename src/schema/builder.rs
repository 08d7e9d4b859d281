//! Helpers for declaring stream schemas
//!
//! Every property built here is nullable; the Zoho API omits or nulls most
//! fields depending on organization settings.

use super::types::{JsonSchema, JsonType, PropertyType, SchemaProperty};
use std::collections::BTreeMap;

fn nullable(t: JsonType) -> SchemaProperty {
    SchemaProperty::of(PropertyType::One(t)).nullable()
}

/// Top-level object schema from a list of named properties
pub fn properties(props: Vec<(&str, SchemaProperty)>) -> JsonSchema {
    let mut schema = JsonSchema::new();
    for (name, prop) in props {
        schema.add_property(name, prop);
    }
    schema
}

pub fn string() -> SchemaProperty {
    nullable(JsonType::String)
}

pub fn number() -> SchemaProperty {
    nullable(JsonType::Number)
}

pub fn integer() -> SchemaProperty {
    nullable(JsonType::Integer)
}

pub fn boolean() -> SchemaProperty {
    nullable(JsonType::Boolean)
}

/// String with `date-time` format
pub fn date_time() -> SchemaProperty {
    string().with_format("date-time")
}

/// String with `date` format
pub fn date() -> SchemaProperty {
    string().with_format("date")
}

/// Nested object
pub fn object(props: Vec<(&str, SchemaProperty)>) -> SchemaProperty {
    let props: BTreeMap<String, SchemaProperty> = props
        .into_iter()
        .map(|(name, prop)| (name.to_string(), prop))
        .collect();
    SchemaProperty::object(props).nullable()
}

/// Array of `items`
pub fn array(items: SchemaProperty) -> SchemaProperty {
    SchemaProperty::array(items).nullable()
}

/// Union of several types, e.g. fields that are sometimes a list and
/// sometimes an empty string
pub fn custom(types: &[JsonType]) -> SchemaProperty {
    SchemaProperty::of(PropertyType::Union(types.to_vec())).nullable()
}
