//! Zoho Books streams
//!
//! Streams form a tree rooted at `organization_id`. A child stream runs once
//! per parent record, with a context built from the parent's record.

mod definitions;
mod params;
mod schemas;

pub use definitions::{ReportKind, StreamDefinition, StreamRegistry, ZOHO_BOOKS_STREAMS};
pub use params::{url_params, ParamInputs};
