//! Engine types
//!
//! Configuration and statistics for the sync engine.

use crate::config::TapConfig;

/// Configuration for sync operation
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// API base, e.g. `https://www.zohoapis.com/books/v3/`
    pub base_url: String,
    /// Starting value for streams without a bookmark
    pub start_date: Option<String>,
    /// `from_date` for report streams
    pub reports_start_date: Option<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: crate::config::DEFAULT_API_URL.to_string(),
            start_date: None,
            reports_start_date: None,
        }
    }
}

impl SyncConfig {
    /// Create a new sync config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take base URL and dates from the tap settings
    pub fn from_tap_config(config: &TapConfig) -> Self {
        Self {
            base_url: config.api_base_url(),
            start_date: config.start_date().map(str::to_string),
            reports_start_date: config.reports_start_date().map(str::to_string),
        }
    }

    /// Set the API base
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the start date
    #[must_use]
    pub fn with_start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    /// Set the report start date
    #[must_use]
    pub fn with_reports_start_date(mut self, date: impl Into<String>) -> Self {
        self.reports_start_date = Some(date.into());
        self
    }
}

/// Statistics from a sync operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncStats {
    /// Total records emitted
    pub records_synced: usize,
    /// Total pages fetched
    pub pages_fetched: usize,
    /// Distinct streams that ran
    pub streams_synced: usize,
    /// Stream runs, one per context
    pub partitions_synced: usize,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl SyncStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Add records
    pub fn add_records(&mut self, count: usize) {
        self.records_synced += count;
    }

    /// Add a page
    pub fn add_page(&mut self) {
        self.pages_fetched += 1;
    }

    /// Add a finished partition
    pub fn add_partition(&mut self) {
        self.partitions_synced += 1;
    }
}
