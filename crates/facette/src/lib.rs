//! Facette - faceted search orchestration.
//!
//! Facette coordinates a set of independently configured search filters
//! against a single incoming query. Given a registry of named filters it:
//!
//! - builds one combined search request applying every active filter;
//! - computes, per filter, an auxiliary search context that excludes the
//!   filter's own constraint but includes its declared relations, so facet
//!   counts answer "what would happen if this filter changed" instead of
//!   collapsing to the current selection;
//! - derives, per filter, the URL parameters for "apply", "reset", and
//!   "reset while preserving everything else" links.
//!
//! The execution engine is a pluggable collaborator behind the
//! [`SearchEngine`] trait; each facet is a pluggable unit behind the
//! [`Filter`] trait. The `facette-memory` companion crate provides an
//! in-memory engine and stock filters.
//!
//! # Quick Start
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::Arc;
//! use facette::{
//!     Filter, FilterManager, FilterRegistry, FilterState, Relation, Request,
//!     SearchEngine,
//! };
//!
//! // An engine whose "query" is just the list of applied constraints.
//! struct EchoEngine;
//!
//! impl SearchEngine for EchoEngine {
//!     type Query = Vec<String>;
//!     type Results = Vec<String>;
//!     type Error = std::convert::Infallible;
//!
//!     fn execute(&self, query: Vec<String>) -> Result<Vec<String>, Self::Error> {
//!         Ok(query)
//!     }
//! }
//!
//! struct TermFilter(&'static str);
//!
//! impl Filter<EchoEngine> for TermFilter {
//!     fn state(&self, request: &dyn Request) -> FilterState {
//!         match request.get_raw(self.0) {
//!             Some(v) => FilterState::active(v).with_url_parameter(self.0, v),
//!             None => FilterState::inactive(),
//!         }
//!     }
//!
//!     fn apply(&self, query: &mut Vec<String>, state: &FilterState) {
//!         if let Some(v) = state.value() {
//!             query.push(format!("{}:{}", self.0, v));
//!         }
//!     }
//! }
//!
//! let registry = FilterRegistry::builder()
//!     .filter("category", TermFilter("category"))
//!     .filter("brand", TermFilter("brand"))
//!     .build()?;
//! let manager = FilterManager::new(Arc::new(registry), EchoEngine);
//!
//! let mut params = HashMap::new();
//! params.insert("category".to_string(), "shoes".to_string());
//!
//! let response = manager.execute(&params)?;
//! assert_eq!(response.results, vec!["category:shoes"]);
//! assert_eq!(response.view_data.len(), 2);
//! # Ok::<(), facette::FacetteError>(())
//! ```
//!
//! # Relation semantics
//!
//! Relations are the small predicate algebra deciding which filters see
//! which: `All`, `Exclude(names)`, `And(..)`, `Or(..)`. The orchestrator
//! always conjoins a filter's declared search relation with
//! `Exclude({own name})` when building its facet context — self-exclusion is
//! structural, not a per-filter obligation.

mod engine;
mod error;
mod filter;
mod manager;
mod registry;
mod relation;
mod request;
mod response;
mod state;
mod view;

pub use engine::SearchEngine;
pub use error::{FacetteError, Result};
pub use filter::{Filter, FilterOptions};
pub use manager::FilterManager;
pub use registry::{FilterRegistry, RegistryBuilder};
pub use relation::Relation;
pub use request::{Request, SearchRequest};
pub use response::SearchResponse;
pub use state::{FilterState, MatchingStates, UrlParams};
pub use view::ViewData;
