//! Numeric range facet.

use facette::{Filter, FilterOptions, FilterState, Relation, Request, SearchEngine, ViewData};
use serde_json::json;

use crate::filters::state_from_request;
use crate::query::MemoryQuery;
use crate::result::ResultSet;

/// A numeric range facet with `min-max` raw values, e.g. `price=10-50`.
///
/// Both bounds are required and inclusive; a malformed raw value degrades to
/// an inactive state rather than failing the request.
pub struct RangeFilter {
    request_field: String,
    document_field: String,
    options: FilterOptions,
}

impl RangeFilter {
    /// A range facet reading `request_field` and constraining `document_field`.
    pub fn new(request_field: impl Into<String>, document_field: impl Into<String>) -> Self {
        RangeFilter {
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

/// Parses a `min-max` raw value into inclusive bounds.
///
/// The separator is the first `-` that splits the value into two parseable
/// numbers in order, so negative bounds work: `-5-10` is `(-5, 10)` and
/// `-10--5` is `(-10, -5)`. A leading `-` is never the separator.
fn parse_bounds(raw: &str) -> Option<(f64, f64)> {
    for (index, _) in raw.match_indices('-').filter(|(index, _)| *index > 0) {
        let from = raw[..index].trim().parse::<f64>();
        let to = raw[index + 1..].trim().parse::<f64>();
        if let (Ok(from), Ok(to)) = (from, to) {
            if from <= to {
                return Some((from, to));
            }
        }
    }
    None
}

impl<E> Filter<E> for RangeFilter
where
    E: SearchEngine<Query = MemoryQuery, Results = ResultSet>,
{
    fn state(&self, request: &dyn Request) -> FilterState {
        let state = state_from_request(request, &self.request_field);
        match state.value().and_then(parse_bounds) {
            Some(_) => state,
            None => FilterState::inactive(),
        }
    }

    fn apply(&self, query: &mut MemoryQuery, state: &FilterState) {
        if let Some((from, to)) = state.value().and_then(parse_bounds) {
            query.and_gte(&self.document_field, from);
            query.and_lte(&self.document_field, to);
        }
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

    fn view_data(&self, _results: &ResultSet, mut data: ViewData) -> ViewData {
        if let Some((from, to)) = data.state.as_deref().and_then(parse_bounds) {
            data.payload = json!({ "from": from, "to": to });
        }
        data
    }
}
