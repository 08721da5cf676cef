//! Inbound request parameters and the parsed search request.
//!
//! The core never touches the HTTP layer. It consumes anything implementing
//! [`Request`] — a read-only bag of raw query-string values — and turns it
//! into a [`SearchRequest`]: one [`FilterState`] per registered filter, in
//! registry order, built once and read-only afterwards.

use std::collections::{BTreeMap, HashMap};

use crate::state::FilterState;

/// A raw, read-only source of incoming parameter values.
///
/// Implemented for the std string maps so a plain query-parameter bag works
/// directly:
///
/// ```
/// use std::collections::HashMap;
/// use facette::Request;
///
/// let mut params = HashMap::new();
/// params.insert("category".to_string(), "shoes".to_string());
/// assert_eq!(params.get_raw("category"), Some("shoes"));
/// ```
pub trait Request {
    /// Returns the raw value for a parameter name, if present.
    fn get_raw(&self, name: &str) -> Option<&str>;
}

impl Request for HashMap<String, String> {
    fn get_raw(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Request for BTreeMap<String, String> {
    fn get_raw(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Request for [(String, String)] {
    fn get_raw(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// The parsed, validated representation of one incoming search request.
///
/// Holds one state per registered filter, in registry order. Built by
/// [`FilterRegistry::build_search_request`](crate::FilterRegistry::build_search_request)
/// and owned by the request-scoped call stack.
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    states: Vec<FilterState>,
}

impl SearchRequest {
    pub(crate) fn new(states: Vec<FilterState>) -> Self {
        SearchRequest { states }
    }

    /// Iterates the filter states in registry order.
    pub fn states(&self) -> std::slice::Iter<'_, FilterState> {
        self.states.iter()
    }

    /// Looks up the state snapshot for a filter name.
    pub fn state(&self, name: &str) -> Option<&FilterState> {
        self.states.iter().find(|state| state.name() == name)
    }

    /// Returns the raw incoming value for a filter name.
    pub fn value_for(&self, name: &str) -> Option<&str> {
        self.state(name).and_then(FilterState::value)
    }

    /// Number of filter states carried by this request.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the request carries no states at all.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
