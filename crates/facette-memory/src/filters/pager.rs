//! Pagination as a filter.

use facette::{Filter, FilterOptions, FilterState, Relation, Request, SearchEngine, ViewData};
use serde_json::json;

use crate::filters::state_from_request;
use crate::query::MemoryQuery;
use crate::result::ResultSet;

/// Pagination, expressed as a filter so page links compose with every other
/// filter's URL state.
///
/// The page size always applies; the filter is only *active* (and only emits
/// a URL parameter) from page 2 onward, keeping page 1 links clean. Other
/// filters typically declare `reset_relation = Exclude({pager name})` so
/// changing them drops the page number.
pub struct PagerFilter {
    request_field: String,
    page_size: usize,
    options: FilterOptions,
}

impl PagerFilter {
    /// A pager reading `request_field` with a fixed page size.
    pub fn new(request_field: impl Into<String>, page_size: usize) -> Self {
        PagerFilter {
            request_field: request_field.into(),
            page_size: page_size.max(1),
            options: FilterOptions::new(),
        }
    }

    /// Sets relations and tags.
    pub fn options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    fn page(&self, state: &FilterState) -> usize {
        state
            .value()
            .and_then(|raw| raw.parse::<usize>().ok())
            .filter(|page| *page >= 1)
            .unwrap_or(1)
    }
}

impl<E> Filter<E> for PagerFilter
where
    E: SearchEngine<Query = MemoryQuery, Results = ResultSet>,
{
    fn state(&self, request: &dyn Request) -> FilterState {
        let state = state_from_request(request, &self.request_field);
        match state.value().and_then(|raw| raw.parse::<usize>().ok()) {
            Some(page) if page >= 2 => state,
            _ => FilterState::inactive(),
        }
    }

    fn apply(&self, query: &mut MemoryQuery, state: &FilterState) {
        let page = self.page(state);
        query.offset((page - 1) * self.page_size);
        query.limit(self.page_size);
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
        let page = data
            .state
            .as_deref()
            .and_then(|raw| raw.parse::<usize>().ok())
            .unwrap_or(1);
        let total_pages = results.total.div_ceil(self.page_size).max(1);
        data.payload = json!({
            "page": page,
            "page_size": self.page_size,
            "total_pages": total_pages,
        });
        data
    }
}
