//! Error types for facette.

use thiserror::Error;

/// Errors raised while configuring a registry or running a search.
#[derive(Debug, Error)]
pub enum FacetteError {
    /// Lookup of a filter name that was never registered.
    #[error("filter '{0}' is not registered")]
    FilterNotFound(String),

    /// A filter's relation mentions a name missing from the registry.
    #[error("filter '{filter}' references unknown filter '{reference}' in its relation")]
    UnknownFilterReference {
        /// The filter whose relation is misconfigured.
        filter: String,
        /// The name the relation mentions.
        reference: String,
    },

    /// Two filters were registered under the same name.
    #[error("filter '{0}' is registered twice")]
    DuplicateFilter(String),

    /// The search engine failed to execute the combined query.
    ///
    /// The engine's own error is preserved as the source and can be
    /// recovered with `Error::source` or downcasting.
    #[error("search engine execution failed")]
    Engine(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for facette operations.
pub type Result<T> = std::result::Result<T, FacetteError>;
