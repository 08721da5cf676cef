//! Single-choice term facet.

use facette::{Filter, FilterOptions, FilterState, Relation, Request, SearchEngine, ViewData};
use serde_json::json;

use crate::filters::state_from_request;
use crate::query::MemoryQuery;
use crate::result::ResultSet;

/// A single-choice facet over one document field.
///
/// When active it constrains the combined query to documents whose field
/// equals the selected value. Its option list is computed from a term
/// aggregation scoped to the *related* query — the context that excludes
/// this filter's own constraint — so selecting `category=shoes` still shows
/// how many results the other categories would have.
///
/// View data payload:
///
/// ```json
/// { "options": [ { "value": "shoes", "count": 12, "active": true }, ... ] }
/// ```
pub struct ChoiceFilter {
    request_field: String,
    document_field: String,
    options: FilterOptions,
}

impl ChoiceFilter {
    /// A choice facet reading `request_field` and constraining `document_field`.
    pub fn new(request_field: impl Into<String>, document_field: impl Into<String>) -> Self {
        ChoiceFilter {
            request_field: request_field.into(),
            document_field: document_field.into(),
            options: FilterOptions::new(),
        }
    }

    /// Sets relations and tags.
    pub fn options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }
}

impl<E> Filter<E> for ChoiceFilter
where
    E: SearchEngine<Query = MemoryQuery, Results = ResultSet>,
{
    fn state(&self, request: &dyn Request) -> FilterState {
        state_from_request(request, &self.request_field)
    }

    fn apply(&self, query: &mut MemoryQuery, state: &FilterState) {
        if let Some(value) = state.value() {
            query.and_eq(&self.document_field, value);
        }
    }

    fn pre_process(&self, query: &mut MemoryQuery, related: &MemoryQuery, _state: &FilterState) {
        query.aggregate(&self.request_field, &self.document_field, Some(related.clone()));
    }

    fn search_relation(&self) -> Relation {
        self.options.search_relation.clone()
    }

    fn reset_relation(&self) -> Relation {
        self.options.reset_relation.clone()
    }

    fn tags(&self) -> Vec<String> {
        self.options.tags.clone()
    }

    fn view_data(&self, results: &ResultSet, mut data: ViewData) -> ViewData {
        let selected = data.state.clone();
        let options: Vec<serde_json::Value> = results
            .buckets(&self.request_field)
            .iter()
            .map(|bucket| {
                json!({
                    "value": bucket.key,
                    "count": bucket.count,
                    "active": selected.as_deref() == Some(bucket.key.as_str()),
                })
            })
            .collect();
        data.payload = json!({ "options": options });
        data
    }

    fn create_view_data(&self) -> Option<ViewData> {
        Some(ViewData::with_payload(json!({ "options": [] })))
    }
}
