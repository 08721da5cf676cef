//! The execution-engine seam.
//!
//! The orchestrator builds queries but never executes them itself; execution
//! belongs to an engine behind the [`SearchEngine`] trait. Anything with a
//! builder-style query value and a synchronous execute call fits: a remote
//! search service client, a database adapter, or the in-memory engine from
//! `facette-memory`.

/// An opaque search execution backend.
///
/// The query type doubles as the search context the orchestrator
/// accumulates: created via `Default`, mutated by each filter's hooks, then
/// handed to [`execute`](SearchEngine::execute) and discarded.
pub trait SearchEngine {
    /// The builder-style query object filters contribute to.
    type Query: Default;
    /// The result set returned by execution.
    type Results;
    /// The engine-defined execution failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Executes a query, consuming it.
    fn execute(&self, query: Self::Query) -> Result<Self::Results, Self::Error>;
}
