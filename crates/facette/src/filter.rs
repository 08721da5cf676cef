//! The filter contract.
//!
//! Every pluggable facet — category choice, price range, pager, sort —
//! implements [`Filter`]. The orchestrator only ever talks to this trait:
//! how a filter turns its raw value into query clauses or aggregations is
//! the filter's business.
//!
//! # Lifecycle
//!
//! A filter is registered once at startup under a unique name and holds no
//! per-request state of its own. For each incoming request the registry asks
//! it to snapshot a [`FilterState`] from the raw value; everything else the
//! filter does is derived from that snapshot.
//!
//! # Example
//!
//! ```
//! use facette::{Filter, FilterState, Relation, Request, SearchEngine};
//!
//! struct NullEngine;
//!
//! impl SearchEngine for NullEngine {
//!     type Query = Vec<String>;
//!     type Results = ();
//!     type Error = std::convert::Infallible;
//!
//!     fn execute(&self, _query: Vec<String>) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! struct TermFilter {
//!     field: String,
//! }
//!
//! impl Filter<NullEngine> for TermFilter {
//!     fn state(&self, request: &dyn Request) -> FilterState {
//!         match request.get_raw(&self.field) {
//!             Some(value) => FilterState::active(value)
//!                 .with_url_parameter(&self.field, value),
//!             None => FilterState::inactive(),
//!         }
//!     }
//!
//!     fn apply(&self, query: &mut Vec<String>, state: &FilterState) {
//!         if let Some(value) = state.value() {
//!             query.push(format!("{} = {}", self.field, value));
//!         }
//!     }
//! }
//! ```

use crate::engine::SearchEngine;
use crate::relation::Relation;
use crate::request::Request;
use crate::state::FilterState;
use crate::view::ViewData;

/// One pluggable facet of a search.
///
/// Object-safe: registries store filters as `Box<dyn Filter<E>>`. The trait
/// requires `Send + Sync` so an initialized registry can serve requests from
/// independent threads.
pub trait Filter<E: SearchEngine>: Send + Sync {
    /// Snapshots this filter's state from the raw incoming request.
    ///
    /// A missing or malformed raw value yields an inactive state; state
    /// construction never fails.
    fn state(&self, request: &dyn Request) -> FilterState;

    /// Contributes this filter's constraint to a query under construction.
    ///
    /// Called for the combined query and for every restricted context the
    /// filter participates in. Inactive states should leave the query
    /// untouched.
    fn apply(&self, query: &mut E::Query, state: &FilterState);

    /// Contributes facet computation to the combined query.
    ///
    /// `related` is the context built from this filter's related filters
    /// only — its own constraint is never part of it. Facet filters
    /// typically register an aggregation scoped to `related` here so option
    /// counts answer "what would happen if this filter changed". The default
    /// does nothing.
    fn pre_process(&self, query: &mut E::Query, related: &E::Query, state: &FilterState) {
        let _ = (query, related, state);
    }

    /// Which other filters constrain this filter's facet computation.
    fn search_relation(&self) -> Relation {
        Relation::All
    }

    /// Which filter states survive a "reset this filter" link.
    fn reset_relation(&self) -> Relation {
        Relation::All
    }

    /// Labels for grouping this filter's view data in output.
    fn tags(&self) -> Vec<String> {
        Vec::new()
    }

    /// Enriches the seeded view data from the executed result set.
    ///
    /// The default passes the seed through unchanged.
    fn view_data(&self, results: &E::Results, data: ViewData) -> ViewData {
        let _ = results;
        data
    }

    /// Optional capability: seed a custom [`ViewData`].
    ///
    /// Filters with a structured rendering payload return `Some` here;
    /// `None` means the orchestrator starts from `ViewData::default()`.
    fn create_view_data(&self) -> Option<ViewData> {
        None
    }
}

/// Shared configuration for filter implementations.
///
/// Relations and tags are configuration, not behavior, so concrete filters
/// usually embed this struct rather than hard-coding their trait answers:
///
/// ```
/// use facette::{FilterOptions, Relation};
///
/// let options = FilterOptions::new()
///     .reset_relation(Relation::exclude(["page"]))
///     .tag("sidebar");
/// assert!(!options.reset_relation.matches("page"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Which other filters affect this filter's facet context.
    pub search_relation: Relation,
    /// Which filter states a "reset this filter" link preserves.
    pub reset_relation: Relation,
    /// Grouping labels surfaced in view data.
    pub tags: Vec<String>,
}

impl FilterOptions {
    /// Default options: related to everything, resets nothing, untagged.
    pub fn new() -> Self {
        FilterOptions::default()
    }

    /// Sets the search relation.
    pub fn search_relation(mut self, relation: Relation) -> Self {
        self.search_relation = relation;
        self
    }

    /// Sets the reset relation.
    pub fn reset_relation(mut self, relation: Relation) -> Self {
        self.reset_relation = relation;
        self
    }

    /// Adds a grouping tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_default_to_all_relations() {
        let options = FilterOptions::new();
        assert!(options.search_relation.matches("anything"));
        assert!(options.reset_relation.matches("anything"));
        assert!(options.tags.is_empty());
    }

    #[test]
    fn options_builder_chains() {
        let options = FilterOptions::new()
            .search_relation(Relation::exclude(["self"]))
            .reset_relation(Relation::exclude(["page"]))
            .tag("a")
            .tag("b");
        assert!(!options.search_relation.matches("self"));
        assert!(!options.reset_relation.matches("page"));
        assert_eq!(options.tags, vec!["a", "b"]);
    }
}
