//! Named sort orders.

use facette::{Filter, FilterOptions, FilterState, Relation, Request, SearchEngine, ViewData};
use serde_json::json;

use crate::filters::state_from_request;
use crate::query::{Dir, MemoryQuery};
use crate::result::ResultSet;

/// One selectable sort order.
#[derive(Debug, Clone)]
pub struct SortChoice {
    key: String,
    field: String,
    dir: Dir,
}

impl SortChoice {
    pub fn new(key: impl Into<String>, field: impl Into<String>, dir: Dir) -> Self {
        SortChoice {
            key: key.into(),
            field: field.into(),
            dir,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// Lets the request pick one of a fixed set of sort orders by key.
///
/// An unknown or missing key falls back to the default choice (when one is
/// set) and leaves the filter inactive, so sort links never leak bogus keys
/// into other filters' URLs.
pub struct SortFilter {
    request_field: String,
    choices: Vec<SortChoice>,
    default_key: Option<String>,
    options: FilterOptions,
}

impl SortFilter {
    pub fn new(request_field: impl Into<String>) -> Self {
        SortFilter {
            request_field: request_field.into(),
            choices: Vec::new(),
            default_key: None,
            options: FilterOptions::new(),
        }
    }

    /// Adds a selectable sort order.
    pub fn choice(mut self, key: impl Into<String>, field: impl Into<String>, dir: Dir) -> Self {
        self.choices.push(SortChoice::new(key, field, dir));
        self
    }

    /// The order used when the request names no valid choice.
    pub fn default_key(mut self, key: impl Into<String>) -> Self {
        self.default_key = Some(key.into());
        self
    }

    /// Sets relations and tags.
    pub fn options(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    fn choice_by_key(&self, key: &str) -> Option<&SortChoice> {
        self.choices.iter().find(|choice| choice.key == key)
    }
}

impl<E> Filter<E> for SortFilter
where
    E: SearchEngine<Query = MemoryQuery, Results = ResultSet>,
{
    fn state(&self, request: &dyn Request) -> FilterState {
        let state = state_from_request(request, &self.request_field);
        match state.value() {
            Some(raw) if self.choice_by_key(raw).is_some() => state,
            _ => FilterState::inactive(),
        }
    }

    fn apply(&self, query: &mut MemoryQuery, state: &FilterState) {
        let chosen = state
            .value()
            .and_then(|key| self.choice_by_key(key))
            .or_else(|| {
                self.default_key
                    .as_deref()
                    .and_then(|key| self.choice_by_key(key))
            });
        if let Some(choice) = chosen {
            query.sort_by(&choice.field, choice.dir);
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
        let active = data.state.clone().or_else(|| self.default_key.clone());
        let choices: Vec<_> = self
            .choices
            .iter()
            .map(|choice| {
                json!({
                    "key": choice.key,
                    "active": active.as_deref() == Some(choice.key.as_str()),
                })
            })
            .collect();
        data.payload = json!({ "choices": choices });
        data
    }
}
