//! The builder-style query value for the in-memory engine.
//!
//! A [`MemoryQuery`] is the search context filters accumulate: AND/OR/NOT
//! clause groups, sort instructions, pagination, and named aggregations.
//! The default query matches every document.
//!
//! Match logic for the clause groups is fixed:
//!
//! ```text
//! match = (all AND clauses match)
//!       ∧ (at least one OR clause matches, OR no OR clauses exist)
//!       ∧ (no NOT clause matches)
//! ```

use std::cmp::Ordering;

use serde_json::Value;

use crate::clause::{field_value, Clause, Op};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

/// One sort instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct SortBy {
    pub(crate) field: String,
    pub(crate) dir: Dir,
}

/// A term aggregation request.
///
/// `scope` is the restricted query whose matching documents the buckets are
/// counted over; `None` counts over every document. Facet filters capture
/// their related-filters context here, which is what keeps a facet's own
/// selection from suppressing its alternative options.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    pub(crate) name: String,
    pub(crate) field: String,
    pub(crate) scope: Option<MemoryQuery>,
}

/// A query over in-memory JSON documents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryQuery {
    and_clauses: Vec<Clause>,
    or_clauses: Vec<Clause>,
    not_clauses: Vec<Clause>,
    sort: Vec<SortBy>,
    offset: Option<usize>,
    limit: Option<usize>,
    aggregations: Vec<Aggregation>,
}

impl MemoryQuery {
    /// Creates an empty query matching every document.
    pub fn new() -> Self {
        MemoryQuery::default()
    }

    // ========================================================================
    // Clause builders
    // ========================================================================

    /// Adds an AND clause.
    pub fn and(&mut self, field: &str, op: Op, value: impl Into<Value>) -> &mut Self {
        self.and_clauses.push(Clause::new(field, op, value));
        self
    }

    /// Adds an OR clause.
    pub fn or(&mut self, field: &str, op: Op, value: impl Into<Value>) -> &mut Self {
        self.or_clauses.push(Clause::new(field, op, value));
        self
    }

    /// Adds a NOT clause.
    pub fn not(&mut self, field: &str, op: Op, value: impl Into<Value>) -> &mut Self {
        self.not_clauses.push(Clause::new(field, op, value));
        self
    }

    /// Adds an AND equality clause.
    pub fn and_eq(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.and(field, Op::Eq, value)
    }

    /// Adds an AND not-equal clause.
    pub fn and_ne(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.and(field, Op::Ne, value)
    }

    /// Adds an AND greater-than-or-equal clause.
    pub fn and_gte(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.and(field, Op::Gte, value)
    }

    /// Adds an AND less-than-or-equal clause.
    pub fn and_lte(&mut self, field: &str, value: impl Into<Value>) -> &mut Self {
        self.and(field, Op::Lte, value)
    }

    /// Adds an AND substring clause.
    pub fn and_contains(&mut self, field: &str, value: &str) -> &mut Self {
        self.and(field, Op::Contains, value)
    }

    // ========================================================================
    // Sort, pagination, aggregations
    // ========================================================================

    /// Adds a sort instruction; earlier instructions take precedence.
    pub fn sort_by(&mut self, field: &str, dir: Dir) -> &mut Self {
        self.sort.push(SortBy {
            field: field.to_string(),
            dir,
        });
        self
    }

    /// Skips the first `n` hits.
    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset = Some(n);
        self
    }

    /// Caps the number of returned hits.
    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit = Some(n);
        self
    }

    /// Registers a named term aggregation over `field`.
    ///
    /// Buckets are counted over the documents matching `scope`, or over all
    /// documents when `scope` is `None`. Aggregations carried by the scope
    /// itself are ignored at execution.
    pub fn aggregate(&mut self, name: &str, field: &str, scope: Option<MemoryQuery>) -> &mut Self {
        self.aggregations.push(Aggregation {
            name: name.to_string(),
            field: field.to_string(),
            scope,
        });
        self
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    /// Whether the query constrains documents at all.
    pub fn is_unconstrained(&self) -> bool {
        self.and_clauses.is_empty() && self.or_clauses.is_empty() && self.not_clauses.is_empty()
    }

    /// The registered aggregations.
    pub fn aggregations(&self) -> &[Aggregation] {
        &self.aggregations
    }

    pub(crate) fn sort_instructions(&self) -> &[SortBy] {
        &self.sort
    }

    pub(crate) fn pagination(&self) -> (usize, Option<usize>) {
        (self.offset.unwrap_or(0), self.limit)
    }

    // ========================================================================
    // Matching
    // ========================================================================

    /// Tests a document against the clause groups.
    ///
    /// Sort, pagination, and aggregations play no part here.
    pub fn matches(&self, document: &Value) -> bool {
        let and_pass = self
            .and_clauses
            .iter()
            .all(|clause| clause.matches(field_value(document, clause.field())));
        if !and_pass {
            return false;
        }

        let or_pass = self.or_clauses.is_empty()
            || self
                .or_clauses
                .iter()
                .any(|clause| clause.matches(field_value(document, clause.field())));
        if !or_pass {
            return false;
        }

        self.not_clauses
            .iter()
            .all(|clause| !clause.matches(field_value(document, clause.field())))
    }
}

/// Orders two documents by a field, missing values last.
pub(crate) fn compare_documents(a: &Value, b: &Value, sort: &SortBy) -> Ordering {
    let ordering = match (field_value(a, &sort.field), field_value(b, &sort.field)) {
        (Some(x), Some(y)) => compare_values(x, y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    match sort.dir {
        Dir::Asc => ordering,
        Dir::Desc => ordering.reverse(),
    }
}

/// A total order over JSON scalars: values rank by type first (numbers,
/// strings, booleans, then everything else), then compare within their type.
/// Mixing a fallback `Equal` across types would break transitivity and leave
/// even same-typed values unsorted.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    type_rank(a).cmp(&type_rank(b)).then_with(|| match (a, b) {
        (Value::Number(_), Value::Number(_)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        },
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    })
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Bool(_) => 2,
        _ => 3,
    }
}
