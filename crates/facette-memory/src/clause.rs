//! Query clauses over JSON document fields.

use std::cmp::Ordering;

use serde_json::Value;

/// Comparison operator for a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than (numeric).
    Gt,
    /// Greater than or equal (numeric).
    Gte,
    /// Less than (numeric).
    Lt,
    /// Less than or equal (numeric).
    Lte,
    /// Case-insensitive substring match (strings).
    Contains,
    /// Prefix match (strings).
    StartsWith,
}

/// One field constraint: `field op value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub(crate) field: String,
    pub(crate) op: Op,
    pub(crate) value: Value,
}

impl Clause {
    /// Creates a new clause.
    pub fn new(field: impl Into<String>, op: Op, value: impl Into<Value>) -> Self {
        Clause {
            field: field.into(),
            op,
            value: value.into(),
        }
    }

    /// The constrained field path.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Tests the clause against a document's field value.
    ///
    /// A missing field never matches. An array field value matches when any
    /// element matches, so multi-valued fields (tag lists) behave like
    /// search-engine keyword fields.
    pub fn matches(&self, field_value: Option<&Value>) -> bool {
        let Some(field_value) = field_value else {
            return false;
        };
        if let Value::Array(elements) = field_value {
            return elements.iter().any(|element| self.matches_scalar(element));
        }
        self.matches_scalar(field_value)
    }

    fn matches_scalar(&self, field_value: &Value) -> bool {
        match self.op {
            Op::Eq => scalar_eq(field_value, &self.value),
            Op::Ne => !scalar_eq(field_value, &self.value),
            Op::Gt => compare_numbers(field_value, &self.value) == Some(Ordering::Greater),
            Op::Gte => matches!(
                compare_numbers(field_value, &self.value),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            Op::Lt => compare_numbers(field_value, &self.value) == Some(Ordering::Less),
            Op::Lte => matches!(
                compare_numbers(field_value, &self.value),
                Some(Ordering::Less | Ordering::Equal)
            ),
            Op::Contains => match (field_value.as_str(), self.value.as_str()) {
                (Some(haystack), Some(needle)) => {
                    haystack.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
            Op::StartsWith => match (field_value.as_str(), self.value.as_str()) {
                (Some(haystack), Some(prefix)) => haystack.starts_with(prefix),
                _ => false,
            },
        }
    }
}

/// Looks up a dotted field path in a document.
///
/// `"brand.name"` traverses nested objects; a missing segment yields `None`.
pub(crate) fn field_value<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    for segment in path.split('.') {
        current = current.get(segment)?;
    }
    Some(current)
}

fn scalar_eq(a: &Value, b: &Value) -> bool {
    // Numbers compare numerically so 10 == 10.0.
    if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
        return x == y;
    }
    a == b
}

fn compare_numbers(a: &Value, b: &Value) -> Option<Ordering> {
    a.as_f64()?.partial_cmp(&b.as_f64()?)
}
