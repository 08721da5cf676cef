//! The orchestrator: entry point for search request execution.
//!
//! [`FilterManager`] ties the pieces together: it resolves each filter's
//! related filters through the relation algebra, builds the combined and
//! restricted search contexts, delegates execution to the engine, and
//! assembles the response.
//!
//! The central correctness rule lives in [`FilterManager::search`]: a
//! filter's facet context is built from
//! `And(search_relation, Exclude({own name}))` — a filter must never
//! restrict its own option computation by its own current selection, or
//! every facet would collapse to a single option once selected.

use std::sync::Arc;

use crate::engine::SearchEngine;
use crate::error::{FacetteError, Result};
use crate::filter::Filter;
use crate::registry::FilterRegistry;
use crate::relation::Relation;
use crate::request::{Request, SearchRequest};
use crate::response::SearchResponse;
use crate::state::{MatchingStates, UrlParams};
use crate::view::ViewData;

/// Coordinates relation resolution, context building, and execution for one
/// registry/engine pair.
///
/// The registry is shared read-only; the manager itself is cheap to clone
/// across threads when the engine is.
pub struct FilterManager<E: SearchEngine> {
    registry: Arc<FilterRegistry<E>>,
    engine: E,
}

impl<E: SearchEngine> FilterManager<E> {
    /// Creates a manager over an initialized registry and engine.
    ///
    /// Takes the registry by value or pre-wrapped in an `Arc` when it is
    /// shared with other managers.
    pub fn new(registry: impl Into<Arc<FilterRegistry<E>>>, engine: E) -> Self {
        FilterManager {
            registry: registry.into(),
            engine,
        }
    }

    /// The registry this manager serves.
    pub fn registry(&self) -> &FilterRegistry<E> {
        &self.registry
    }

    /// Builds a search request from raw parameters and runs [`search`](Self::search).
    pub fn execute(&self, request: &dyn Request) -> Result<SearchResponse<E::Results>> {
        self.search(&self.registry.build_search_request(request))
    }

    /// Generates and executes the combined search.
    ///
    /// Builds the combined query from every filter, lets each filter
    /// pre-process it against its related-filters-only context, executes
    /// once, and assembles view data and URL parameters per filter. Either
    /// the whole search succeeds or the call fails; there is no partial
    /// result.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse<E::Results>> {
        let mut query = self.registry.build_query(request);

        for (name, filter) in self.registry.all() {
            // The filter's declared relation, minus the filter itself.
            let relation = Relation::and([filter.search_relation(), Relation::exclude([name])]);
            let related = self.registry.filters_matching(&relation);
            let related_query = self.registry.build_query_for(request, &related);

            if let Some(state) = request.state(name) {
                filter.pre_process(&mut query, &related_query, state);
            }
        }

        let results = self
            .engine
            .execute(query)
            .map_err(|err| FacetteError::Engine(Box::new(err)))?;

        let view_data = self.filters_view_data(&results, request);
        let url_parameters = self.compose_url_parameters(request, None, &[]);

        Ok(SearchResponse {
            view_data,
            results,
            url_parameters,
        })
    }

    /// Executes the combined query without any facet pre-processing.
    ///
    /// Cheaper than [`search`](Self::search) when view data and facet counts
    /// are not needed.
    pub fn simple_search(&self, request: &dyn Request) -> Result<E::Results> {
        let request = self.registry.build_search_request(request);
        let query = self.registry.build_query(&request);
        self.engine
            .execute(query)
            .map_err(|err| FacetteError::Engine(Box::new(err)))
    }

    /// Composes the URL parameters for a navigation link.
    ///
    /// With no filter and no exclusions this is the "preserve everything"
    /// state. Given a filter, its reset relation decides which other states
    /// survive. Excluded names are dropped entirely regardless of any
    /// relation.
    ///
    /// Merging is last-write-wins in request (registry) order; two filters
    /// sharing a parameter key is a configuration smell, so a collision with
    /// a differing value is logged rather than silently absorbed.
    pub fn compose_url_parameters(
        &self,
        request: &SearchRequest,
        filter: Option<&dyn Filter<E>>,
        exclude: &[&str],
    ) -> UrlParams {
        let mut relations = Vec::new();
        if let Some(filter) = filter {
            relations.push(filter.reset_relation());
        }
        if !exclude.is_empty() {
            relations.push(Relation::exclude(exclude.iter().copied()));
        }
        let relation = Relation::and(relations);

        let mut out = UrlParams::new();
        for state in MatchingStates::new(request.states(), &relation) {
            for (key, value) in state.url_parameters() {
                if let Some(previous) = out.insert(key.clone(), value.clone()) {
                    if previous != *value {
                        tracing::warn!(
                            "url parameter '{key}' collides across filters \
                             ('{previous}' replaced by '{value}')"
                        );
                    }
                }
            }
        }
        out
    }

    /// Assembles view data for every filter, in registry order.
    fn filters_view_data(&self, results: &E::Results, request: &SearchRequest) -> Vec<ViewData> {
        let mut out = Vec::with_capacity(self.registry.len());

        for (name, filter) in self.registry.all() {
            let mut data = filter.create_view_data().unwrap_or_default();
            data.name = name.to_string();
            data.state = request.value_for(name).map(str::to_string);
            data.tags = filter.tags();
            data.url_parameters = self.compose_url_parameters(request, Some(filter), &[]);
            data.reset_url_parameters = self.compose_url_parameters(request, Some(filter), &[name]);
            out.push(filter.view_data(results, data));
        }

        out
    }
}

impl<E: SearchEngine + Clone> Clone for FilterManager<E> {
    fn clone(&self) -> Self {
        FilterManager {
            registry: Arc::clone(&self.registry),
            engine: self.engine.clone(),
        }
    }
}
