//! Result sets produced by the in-memory engine.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// One term-aggregation bucket: a distinct field value and its document count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    /// The stringified field value.
    pub key: String,
    /// Number of documents carrying the value within the aggregation scope.
    pub count: u64,
}

/// The outcome of executing a [`MemoryQuery`](crate::MemoryQuery).
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultSet {
    /// Matching documents after sort and pagination.
    pub hits: Vec<Value>,
    /// Number of matching documents before pagination.
    pub total: usize,
    /// Aggregation buckets keyed by aggregation name, ordered by count
    /// descending then key ascending.
    pub aggregations: BTreeMap<String, Vec<Bucket>>,
}

impl ResultSet {
    /// The buckets of a named aggregation, empty when absent.
    pub fn buckets(&self, name: &str) -> &[Bucket] {
        self.aggregations.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}
