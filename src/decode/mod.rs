//! Response decoder module
//!
//! Records are located in the response body with a JSONPath expression:
//! `$.invoices[*]` expands an array, `$.invoice` yields a single object.

mod decoders;
mod types;

pub use decoders::JsonDecoder;
pub use types::RecordDecoder;
