//! Schema module
//!
//! JSON Schema types, a small builder used by the stream definitions, and
//! record conformance.

mod builder;
mod conform;
mod types;

pub use builder::{
    array, boolean, custom, date, date_time, integer, number, object, properties, string,
};
pub use conform::conform_record;
pub use types::{JsonSchema, JsonType, PropertyType, SchemaProperty};
