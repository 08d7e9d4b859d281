//! JSON Schema documents for stream records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Primitive JSON Schema type name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

/// The `type` keyword: one name, or a union such as `["string", "null"]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyType {
    One(JsonType),
    Union(Vec<JsonType>),
}

impl PropertyType {
    /// Whether `t` is one of the allowed types
    pub fn contains(&self, t: JsonType) -> bool {
        match self {
            PropertyType::One(one) => *one == t,
            PropertyType::Union(types) => types.contains(&t),
        }
    }

    /// First non-null type
    pub fn base(&self) -> Option<JsonType> {
        match self {
            PropertyType::One(JsonType::Null) => None,
            PropertyType::One(t) => Some(*t),
            PropertyType::Union(types) => types.iter().copied().find(|t| *t != JsonType::Null),
        }
    }

    /// The same type with `null` allowed
    #[must_use]
    pub fn or_null(self) -> Self {
        match self {
            t if t.contains(JsonType::Null) => t,
            PropertyType::One(t) => PropertyType::Union(vec![t, JsonType::Null]),
            PropertyType::Union(mut types) => {
                types.push(JsonType::Null);
                PropertyType::Union(types)
            }
        }
    }
}

/// One property of a record schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaProperty {
    #[serde(rename = "type")]
    pub json_type: PropertyType,

    /// `date-time`, `date`, ...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Nested properties of an object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, SchemaProperty>>,

    /// Element schema of an array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaProperty>>,
}

impl SchemaProperty {
    /// Property of the given type
    pub fn of(json_type: PropertyType) -> Self {
        Self {
            json_type,
            format: None,
            properties: None,
            items: None,
        }
    }

    /// Object with nested properties
    pub fn object(properties: BTreeMap<String, SchemaProperty>) -> Self {
        Self {
            properties: Some(properties),
            ..Self::of(PropertyType::One(JsonType::Object))
        }
    }

    /// Array of `items`
    pub fn array(items: SchemaProperty) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of(PropertyType::One(JsonType::Array))
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: &str) -> Self {
        self.format = Some(format.to_string());
        self
    }

    /// Allow `null` in addition to the current type
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.json_type = self.json_type.or_null();
        self
    }

    pub fn is_nullable(&self) -> bool {
        self.json_type.contains(JsonType::Null)
    }
}

/// Top-level record schema, always an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    #[serde(rename = "type")]
    pub json_type: JsonType,

    #[serde(default)]
    pub properties: BTreeMap<String, SchemaProperty>,

    /// Whether undeclared properties are allowed
    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<bool>,
}

impl Default for JsonSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonSchema {
    /// Object schema without properties
    pub fn new() -> Self {
        Self {
            json_type: JsonType::Object,
            properties: BTreeMap::new(),
            additional_properties: None,
        }
    }

    pub fn add_property(&mut self, name: &str, property: SchemaProperty) {
        self.properties.insert(name.to_string(), property);
    }

    pub fn get_property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.get(name)
    }

    /// Serialize for a `SCHEMA` message or catalog entry
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}
