//! The in-memory execution engine.

use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use facette::SearchEngine;

use crate::clause::field_value;
use crate::query::{compare_documents, MemoryQuery};
use crate::result::{Bucket, ResultSet};

/// Errors raised by the in-memory engine.
#[derive(Debug, Error)]
pub enum MemoryError {
    /// A document in the corpus is not a JSON object.
    #[error("document at index {0} is not a JSON object")]
    InvalidDocument(usize),
}

/// A search engine over an owned, in-memory JSON document corpus.
///
/// # Example
///
/// ```
/// use facette::SearchEngine;
/// use facette_memory::{MemoryEngine, MemoryQuery};
/// use serde_json::json;
///
/// let engine = MemoryEngine::new(vec![
///     json!({"name": "Trail Boots", "category": "shoes"}),
///     json!({"name": "Wool Shirt", "category": "shirts"}),
/// ]);
///
/// let mut query = MemoryQuery::new();
/// query.and_eq("category", "shoes");
///
/// let results = engine.execute(query)?;
/// assert_eq!(results.total, 1);
/// # Ok::<(), facette_memory::MemoryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MemoryEngine {
    documents: Vec<Value>,
}

impl MemoryEngine {
    /// Creates an engine over a document corpus.
    pub fn new(documents: Vec<Value>) -> Self {
        MemoryEngine { documents }
    }

    /// Number of documents in the corpus.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn matching<'a>(&'a self, query: &'a MemoryQuery) -> Result<Vec<&'a Value>, MemoryError> {
        let mut hits = Vec::new();
        for (index, document) in self.documents.iter().enumerate() {
            if !document.is_object() {
                return Err(MemoryError::InvalidDocument(index));
            }
            if query.matches(document) {
                hits.push(document);
            }
        }
        Ok(hits)
    }

    fn buckets_for(&self, field: &str, scope: Option<&MemoryQuery>) -> Result<Vec<Bucket>, MemoryError> {
        let unconstrained = MemoryQuery::new();
        let scope = scope.unwrap_or(&unconstrained);
        let mut counts: HashMap<String, u64> = HashMap::new();

        for document in self.matching(scope)? {
            let Some(value) = field_value(document, field) else {
                continue;
            };
            match value {
                Value::Array(elements) => {
                    for element in elements {
                        if let Some(key) = bucket_key(element) {
                            *counts.entry(key).or_default() += 1;
                        }
                    }
                }
                scalar => {
                    if let Some(key) = bucket_key(scalar) {
                        *counts.entry(key).or_default() += 1;
                    }
                }
            }
        }

        let mut buckets: Vec<Bucket> = counts
            .into_iter()
            .map(|(key, count)| Bucket { key, count })
            .collect();
        // Count descending, key ascending: deterministic output.
        buckets.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.key.cmp(&b.key)));
        Ok(buckets)
    }
}

/// Stringifies a scalar into a bucket key; objects and nulls are skipped.
fn bucket_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl SearchEngine for MemoryEngine {
    type Query = MemoryQuery;
    type Results = ResultSet;
    type Error = MemoryError;

    fn execute(&self, query: MemoryQuery) -> Result<ResultSet, MemoryError> {
        let mut hits = self.matching(&query)?;
        let total = hits.len();

        for sort in query.sort_instructions().iter().rev() {
            hits.sort_by(|a, b| compare_documents(a, b, sort));
        }

        let (offset, limit) = query.pagination();
        let page: Vec<Value> = hits
            .into_iter()
            .skip(offset)
            .take(limit.unwrap_or(usize::MAX))
            .cloned()
            .collect();

        let mut aggregations = std::collections::BTreeMap::new();
        for aggregation in query.aggregations() {
            let buckets = self.buckets_for(&aggregation.field, aggregation.scope.as_ref())?;
            aggregations.insert(aggregation.name.clone(), buckets);
        }

        Ok(ResultSet {
            hits: page,
            total,
            aggregations,
        })
    }
}
