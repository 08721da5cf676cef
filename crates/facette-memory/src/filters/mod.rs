//! Stock filter implementations for the in-memory engine.
//!
//! Each filter reads one request field (its URL/query-string key), emits
//! `{request_field: raw}` URL parameters when active, and constrains one or
//! more document fields. Relations and tags are configured through
//! [`FilterOptions`](facette::FilterOptions).
//!
//! The filters implement [`Filter`](facette::Filter) for any engine whose
//! query is a [`MemoryQuery`](crate::MemoryQuery) and whose results are a
//! [`ResultSet`](crate::ResultSet), so a custom engine sharing those types
//! can reuse them unchanged.

mod choice;
mod pager;
mod query_string;
mod range;
mod sort;

pub use choice::ChoiceFilter;
pub use pager::PagerFilter;
pub use query_string::QueryStringFilter;
pub use range::RangeFilter;
pub use sort::{SortChoice, SortFilter};

use facette::{FilterState, Request};

/// Snapshots a state from one request field; empty values count as unset.
fn state_from_request(request: &dyn Request, field: &str) -> FilterState {
    match request.get_raw(field) {
        Some(value) if !value.is_empty() => {
            FilterState::active(value).with_url_parameter(field, value)
        }
        _ => FilterState::inactive(),
    }
}
