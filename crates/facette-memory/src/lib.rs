//! An in-memory search engine for [`facette`] plus a set of stock filters.
//!
//! The engine searches a fixed collection of JSON documents with a
//! builder-style query: AND/OR/NOT clause groups over dotted field paths,
//! multi-key sorting, pagination, and scoped term aggregations. It is meant
//! for tests, demos, and small datasets; it makes no attempt at indexing.
//!
//! The stock filters cover the common faceted-search vocabulary. They work
//! against any engine whose query type is [`MemoryQuery`] and whose result
//! type is [`ResultSet`]:
//!
//! - [`ChoiceFilter`]: one facet value with self-excluding option counts
//! - [`QueryStringFilter`]: case-insensitive substring search
//! - [`RangeFilter`]: numeric `from-to` bounds
//! - [`SortFilter`]: named sort orders
//! - [`PagerFilter`]: pagination with clean page 1 links
//!
//! # Example
//!
//! ```
//! use facette::{FilterManager, FilterRegistry};
//! use facette_memory::{filters::ChoiceFilter, MemoryEngine};
//! use serde_json::json;
//! use std::collections::HashMap;
//!
//! let engine = MemoryEngine::new(vec![
//!     json!({"title": "Trail Boots", "category": "shoes"}),
//!     json!({"title": "Wool Shirt", "category": "shirts"}),
//! ]);
//! let registry = FilterRegistry::builder()
//!     .filter("category", ChoiceFilter::new("category", "category"))
//!     .build()?;
//! let manager = FilterManager::new(registry, engine);
//!
//! let mut request = HashMap::new();
//! request.insert("category".to_string(), "shoes".to_string());
//! let response = manager.execute(&request)?;
//!
//! assert_eq!(response.results.total, 1);
//! // The facet still counts the other category's documents.
//! assert_eq!(response.results.buckets("category").len(), 2);
//! # Ok::<(), facette::FacetteError>(())
//! ```

mod clause;
mod engine;
pub mod filters;
mod query;
mod result;

pub use clause::{Clause, Op};
pub use engine::{MemoryEngine, MemoryError};
pub use query::{Aggregation, Dir, MemoryQuery, SortBy};
pub use result::{Bucket, ResultSet};
