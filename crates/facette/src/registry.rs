//! The filter registry: the ordered, immutable-after-init collection of
//! configured filters.
//!
//! A registry is assembled once at startup through [`RegistryBuilder`],
//! validated, and then shared read-only into the orchestrator (typically via
//! `Arc`). Registration order is preserved through every derived view —
//! iteration, relation matching, search-request construction — so output is
//! deterministic.

use crate::engine::SearchEngine;
use crate::error::{FacetteError, Result};
use crate::filter::Filter;
use crate::relation::Relation;
use crate::request::{Request, SearchRequest};

/// Ordered mapping from filter name to filter instance.
pub struct FilterRegistry<E: SearchEngine> {
    entries: Vec<(String, Box<dyn Filter<E>>)>,
}

impl<E: SearchEngine> FilterRegistry<E> {
    /// Starts building a registry.
    pub fn builder() -> RegistryBuilder<E> {
        RegistryBuilder::new()
    }

    /// Iterates every `(name, filter)` pair in registration order.
    pub fn all(&self) -> impl Iterator<Item = (&str, &dyn Filter<E>)> {
        self.entries
            .iter()
            .map(|(name, filter)| (name.as_str(), filter.as_ref()))
    }

    /// Iterates the registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Looks up a filter by name.
    pub fn get(&self, name: &str) -> Result<&dyn Filter<E>> {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, filter)| filter.as_ref())
            .ok_or_else(|| FacetteError::FilterNotFound(name.to_string()))
    }

    /// Keeps the filters whose name satisfies the relation, in
    /// registration order.
    pub fn filters_matching(&self, relation: &Relation) -> Vec<(&str, &dyn Filter<E>)> {
        self.all()
            .filter(|(name, _)| relation.matches(name))
            .collect()
    }

    /// Snapshots every filter's state from a raw request.
    ///
    /// States carry the registry name and keep registration order, so the
    /// resulting request is co-indexed with the registry.
    pub fn build_search_request(&self, request: &dyn Request) -> SearchRequest {
        let states = self
            .all()
            .map(|(name, filter)| {
                let mut state = filter.state(request);
                state.stamp_name(name);
                state
            })
            .collect();
        SearchRequest::new(states)
    }

    /// Builds the combined query from every registered filter.
    pub fn build_query(&self, request: &SearchRequest) -> E::Query {
        self.build_query_for(request, &self.filters_matching(&Relation::All))
    }

    /// Builds a restricted query from the given filters only.
    ///
    /// Filters without a state in the request contribute nothing; states are
    /// co-indexed with the registry whenever the request came from
    /// [`build_search_request`](Self::build_search_request).
    pub fn build_query_for(
        &self,
        request: &SearchRequest,
        filters: &[(&str, &dyn Filter<E>)],
    ) -> E::Query {
        let mut query = E::Query::default();
        for (name, filter) in filters {
            if let Some(state) = request.state(name) {
                filter.apply(&mut query, state);
            }
        }
        query
    }

    /// Number of registered filters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<E: SearchEngine> std::fmt::Debug for FilterRegistry<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("names", &self.names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builds and validates a [`FilterRegistry`].
pub struct RegistryBuilder<E: SearchEngine> {
    entries: Vec<(String, Box<dyn Filter<E>>)>,
}

impl<E: SearchEngine> RegistryBuilder<E> {
    fn new() -> Self {
        RegistryBuilder {
            entries: Vec::new(),
        }
    }

    /// Registers a filter under a unique name.
    pub fn filter(mut self, name: impl Into<String>, filter: impl Filter<E> + 'static) -> Self {
        self.entries.push((name.into(), Box::new(filter)));
        self
    }

    /// Finalizes the registry.
    ///
    /// Fails with [`FacetteError::DuplicateFilter`] on repeated names and
    /// with [`FacetteError::UnknownFilterReference`] when any filter's
    /// search or reset relation mentions a name that is not registered.
    /// Relations are literal values, so validating here — before the
    /// registry becomes immutable — means a misconfiguration can never
    /// first surface mid-search.
    pub fn build(self) -> Result<FilterRegistry<E>> {
        for (index, (name, _)) in self.entries.iter().enumerate() {
            if self.entries[..index].iter().any(|(other, _)| other == name) {
                return Err(FacetteError::DuplicateFilter(name.clone()));
            }
        }

        for (name, filter) in &self.entries {
            for relation in [filter.search_relation(), filter.reset_relation()] {
                for reference in relation.referenced_names() {
                    if !self.entries.iter().any(|(other, _)| other == reference) {
                        return Err(FacetteError::UnknownFilterReference {
                            filter: name.clone(),
                            reference: reference.to_string(),
                        });
                    }
                }
            }
        }

        Ok(FilterRegistry {
            entries: self.entries,
        })
    }
}

impl<E: SearchEngine> Default for RegistryBuilder<E> {
    fn default() -> Self {
        RegistryBuilder::new()
    }
}
