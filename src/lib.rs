//! # tap-zohobooks
//!
//! A Singer tap that extracts accounting data from the Zoho Books API v3.
//!
//! ## Features
//!
//! - **OAuth2 refresh**: Access tokens are refreshed on demand and written
//!   back to the config file
//! - **Stream tree**: Organizations fan out to journals, invoices, orders,
//!   contacts and reports, with per-parent partitions
//! - **Incremental sync**: `last_modified_time` bookmarks per partition
//! - **Quota aware**: Request pacing, exponential backoff and daily quota waits
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use tap_zohobooks::catalog::Catalog;
//! use tap_zohobooks::engine::{SyncConfig, SyncEngine};
//! use tap_zohobooks::output::MessageWriter;
//! use tap_zohobooks::state::StateManager;
//! use tap_zohobooks::streams::StreamRegistry;
//!
//! let catalog = Catalog::discover(&StreamRegistry::zoho_books());
//! let writer = MessageWriter::new(std::io::stdout());
//! let mut engine = SyncEngine::new(client, catalog, StateManager::in_memory(), writer)
//!     .with_config(SyncConfig::from_tap_config(&config));
//! let stats = engine.sync_all().await?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  cli: --about  --discover  --test  sync                      │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬───────────┐
//! │   Auth   │   HTTP    │   Streams     │  Catalog  │  Output   │
//! ├──────────┼───────────┼───────────────┼───────────┼───────────┤
//! │ OAuth2   │ Retry     │ Registry      │ Selection │ SCHEMA    │
//! │ Refresh  │ Pacing    │ URL params    │ Metadata  │ RECORD    │
//! │ Persist  │ Quota     │ Page context  │           │ STATE     │
//! └──────────┴───────────┴───────────────┴───────────┴───────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the tap
pub mod error;

/// Common types and type aliases
pub mod types;

/// Timestamp parsing and formatting
pub mod dates;

/// Settings loading and validation
pub mod config;

/// OAuth2 refresh-token authentication
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Pagination over `page_context`
pub mod pagination;

/// Response decoders
pub mod decode;

/// Path templates
pub mod template;

/// JSON schemas for streams
pub mod schema;

/// Stream definitions and the stream tree
pub mod streams;

/// Singer catalog discovery and selection
pub mod catalog;

/// Bookmarks and checkpointing
pub mod state;

/// Singer message output
pub mod output;

/// Main execution engine
pub mod engine;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
