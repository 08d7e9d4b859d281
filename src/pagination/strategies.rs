//! Pagination strategy implementations

use super::types::{NextPage, PaginationState, Paginator};
use crate::error::{Error, Result};
use serde_json::Value;

// ============================================================================
// Page Context Pagination
// ============================================================================

/// Zoho `page_context` pagination
///
/// List endpoints return
/// `{"page_context": {"page": 1, "per_page": 200, "has_more_page": true}}`
/// next to the records.
#[derive(Debug, Clone)]
pub struct PageContextPaginator {
    /// First page number
    pub start_page: u32,
}

impl Default for PageContextPaginator {
    fn default() -> Self {
        Self { start_page: 1 }
    }
}

impl PageContextPaginator {
    /// Create a paginator starting at page 1
    pub fn new() -> Self {
        Self::default()
    }
}

impl Paginator for PageContextPaginator {
    fn start_page(&self) -> Option<u32> {
        Some(self.start_page)
    }

    fn process_response(
        &self,
        body: Option<&Value>,
        records_count: usize,
        state: &mut PaginationState,
    ) -> Result<NextPage> {
        state.add_fetched(records_count as u64);

        let page_context = body.and_then(|b| b.get("page_context"));
        let has_more = page_context
            .and_then(|pc| pc.get("has_more_page"))
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if !has_more {
            state.mark_done();
            return Ok(NextPage::Done);
        }

        let raw_page = page_context
            .and_then(|pc| pc.get("page"))
            .and_then(Value::as_u64)
            .unwrap_or(1);
        let next = u32::try_from(raw_page)
            .ok()
            .and_then(|current| current.checked_add(1))
            .ok_or_else(|| Error::Pagination {
                message: format!("page number {raw_page} out of range"),
            })?;
        state.advance_to(next)?;

        Ok(NextPage::Continue { page: next })
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// Single-response endpoints such as `/salesorders/{id}`
#[derive(Debug, Clone, Default)]
pub struct NoPaginator;

impl NoPaginator {
    /// Create a new no-op paginator
    pub fn new() -> Self {
        Self
    }
}

impl Paginator for NoPaginator {
    fn start_page(&self) -> Option<u32> {
        None
    }

    fn process_response(
        &self,
        _body: Option<&Value>,
        records_count: usize,
        state: &mut PaginationState,
    ) -> Result<NextPage> {
        state.add_fetched(records_count as u64);
        state.mark_done();
        Ok(NextPage::Done)
    }
}
