//! CLI module
//!
//! Command-line interface following the Singer tap conventions.
//!
//! # Modes
//!
//! - `--about` - Describe the tap and its settings
//! - `--discover` - Print the catalog
//! - `--test` - Check credentials against the API
//! - default - Sync selected streams to stdout

mod commands;
mod runner;

pub use commands::{Cli, OutputFormat};
pub use runner::{about_info, about_markdown, Runner};
