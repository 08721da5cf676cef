//! The assembled search response.

use serde::Serialize;

use crate::state::UrlParams;
use crate::view::ViewData;

/// The unit returned to the caller of a search.
///
/// `view_data` holds exactly one entry per registered filter, in registry
/// order. `url_parameters` is the full current link state with nothing
/// reset — "preserve everything". Immutable once constructed.
#[derive(Debug, Serialize)]
pub struct SearchResponse<R> {
    /// Per-filter view data, in registry order.
    pub view_data: Vec<ViewData>,
    /// The raw result set from the execution engine.
    pub results: R,
    /// The composed URL parameters for the full current state.
    pub url_parameters: UrlParams,
}

impl<R> SearchResponse<R> {
    /// Looks up one filter's view data by name.
    pub fn view(&self, name: &str) -> Option<&ViewData> {
        self.view_data.iter().find(|data| data.name == name)
    }
}
