//! Per-filter view data for a search results page.

use serde::Serialize;

use crate::state::UrlParams;

/// Everything a results page needs to render one filter.
///
/// One instance per registered filter is assembled for every response, in
/// registry order. `url_parameters` is the link state with this filter's own
/// reset relation applied; `reset_url_parameters` additionally drops the
/// filter's own entry — the "remove this filter" link.
///
/// `payload` carries the filter-specific rendering data (facet options,
/// range bounds, sort choices) as free-form JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewData {
    /// The registry name of the filter.
    pub name: String,
    /// The raw incoming value, if the request set this filter.
    pub state: Option<String>,
    /// Grouping labels declared by the filter.
    pub tags: Vec<String>,
    /// Link state for "navigate with this filter changed".
    pub url_parameters: UrlParams,
    /// Link state for "remove this filter entirely".
    pub reset_url_parameters: UrlParams,
    /// Filter-specific rendering payload.
    pub payload: serde_json::Value,
}

impl ViewData {
    /// An empty view data value.
    pub fn new() -> Self {
        ViewData::default()
    }

    /// A view data value seeded with a rendering payload.
    pub fn with_payload(payload: serde_json::Value) -> Self {
        ViewData {
            payload,
            ..ViewData::default()
        }
    }
}
