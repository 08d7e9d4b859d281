//! Pagination types and traits

use crate::error::{Error, Result};
use serde_json::Value;

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Request this page next
    Continue {
        /// Page number to send as `page`
        page: u32,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }
}

/// Progress through one stream partition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationState {
    /// Page to request next, `None` for unpaginated endpoints
    pub page: Option<u32>,
    /// Responses processed so far
    pub pages_fetched: u32,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create state starting at `page`
    pub fn new(page: Option<u32>) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Record a processed response
    pub fn add_fetched(&mut self, count: u64) {
        self.pages_fetched += 1;
        self.total_fetched += count;
    }

    /// Move to `page`, refusing to request the same page twice in a row
    pub fn advance_to(&mut self, page: u32) -> Result<()> {
        if self.page == Some(page) {
            return Err(Error::Pagination {
                message: format!("loop detected, API returned page {page} again"),
            });
        }
        self.page = Some(page);
        Ok(())
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Page to request first
    fn start_page(&self) -> Option<u32>;

    /// Process a response and determine if there's a next page
    fn process_response(
        &self,
        body: Option<&Value>,
        records_count: usize,
        state: &mut PaginationState,
    ) -> Result<NextPage>;
}
