//! State management module
//!
//! Bookmarks let incremental streams resume where the previous run stopped.
//!
//! # Overview
//!
//! - `State` - Singer bookmark structure with per-context partitions
//! - `StateManager` - Loads `--state` input and advances bookmarks

mod manager;
mod types;

pub use manager::{is_newer, StateManager};
pub use types::{PartitionState, State, StreamState};
