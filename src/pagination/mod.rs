//! Pagination module
//!
//! Zoho Books list endpoints page with a `page` query parameter and report
//! progress in `page_context`. Detail endpoints return a single object.

mod strategies;
mod types;

pub use strategies::{NoPaginator, PageContextPaginator};
pub use types::{NextPage, PaginationState, Paginator};
