//! Per-request filter state and the relation-driven state iterator.
//!
//! A [`FilterState`] pairs a filter name with the raw value it received in
//! the current request and the URL parameters that reproduce that value in a
//! link. States are snapshots: built fresh for every request, never
//! persisted.
//!
//! [`MatchingStates`] is the lazy adapter used wherever only a subset of
//! states matters: it walks a state source and yields the states whose name
//! satisfies a [`Relation`], preserving source order. It allocates nothing;
//! restarting means constructing a new adapter over a fresh source iterator.

use std::collections::BTreeMap;

use crate::relation::Relation;

/// URL/query-string parameters keyed by parameter name.
pub type UrlParams = BTreeMap<String, String>;

/// A per-request snapshot of one filter's incoming value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    name: String,
    value: Option<String>,
    url_parameters: UrlParams,
}

impl FilterState {
    /// A state for a filter the request did not set.
    pub fn inactive() -> Self {
        FilterState::default()
    }

    /// A state carrying the raw request value for an active filter.
    pub fn active(value: impl Into<String>) -> Self {
        FilterState {
            value: Some(value.into()),
            ..FilterState::default()
        }
    }

    /// Adds a URL parameter representing this state in links.
    pub fn with_url_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_parameters.insert(key.into(), value.into());
        self
    }

    /// The registry name this state belongs to.
    ///
    /// Stamped by the registry when the search request is built; empty on a
    /// freshly constructed state.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The raw incoming value, if the filter was set.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Whether the request set this filter at all.
    pub fn is_active(&self) -> bool {
        self.value.is_some()
    }

    /// The URL parameters that reproduce this state.
    pub fn url_parameters(&self) -> &UrlParams {
        &self.url_parameters
    }

    pub(crate) fn stamp_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

/// Lazily yields the states whose name satisfies a relation.
///
/// # Example
///
/// ```
/// use facette::{FilterState, MatchingStates, Relation};
///
/// let states = vec![FilterState::active("shoes"), FilterState::active("10-50")];
/// let relation = Relation::all();
/// let kept: Vec<_> = MatchingStates::new(states.iter(), &relation).collect();
/// assert_eq!(kept.len(), 2);
/// ```
pub struct MatchingStates<'r, I> {
    source: I,
    relation: &'r Relation,
}

impl<'r, I> MatchingStates<'r, I> {
    /// Wraps a state source with a relation predicate.
    ///
    /// The relation borrow is independent of the yielded state lifetime, so
    /// a temporary relation works: the yielded states only borrow from the
    /// source.
    pub fn new(source: I, relation: &'r Relation) -> Self {
        MatchingStates { source, relation }
    }
}

impl<'a, 'r, I> Iterator for MatchingStates<'r, I>
where
    I: Iterator<Item = &'a FilterState>,
{
    type Item = &'a FilterState;

    fn next(&mut self) -> Option<Self::Item> {
        self.source.find(|state| self.relation.matches(state.name()))
    }
}
