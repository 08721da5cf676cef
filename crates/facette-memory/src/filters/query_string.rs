//! Free text matching.

use facette::{Filter, FilterOptions, FilterState, Relation, Request, SearchEngine};

use crate::filters::state_from_request;
use crate::query::MemoryQuery;
use crate::result::ResultSet;

/// Case-insensitive substring match of a request value against one document
/// field.
pub struct QueryStringFilter {
    request_field: String,
    document_field: String,
    options: FilterOptions,
}

impl QueryStringFilter {
    pub fn new(request_field: impl Into<String>, document_field: impl Into<String>) -> Self {
        QueryStringFilter {
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

impl<E> Filter<E> for QueryStringFilter
where
    E: SearchEngine<Query = MemoryQuery, Results = ResultSet>,
{
    fn state(&self, request: &dyn Request) -> FilterState {
        state_from_request(request, &self.request_field)
    }

    fn apply(&self, query: &mut MemoryQuery, state: &FilterState) {
        if let Some(value) = state.value() {
            query.and_contains(&self.document_field, value);
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
}
