//! Relation algebra over filter names.
//!
//! A [`Relation`] is an immutable predicate deciding which filters influence
//! another filter's search context or URL state. Relations compose
//! recursively through [`Relation::and`] and [`Relation::or`] and are plain
//! values: cheap to clone, serializable, and side-effect free.
//!
//! # Semantics
//!
//! ```text
//! All.matches(n)        = true
//! Exclude(S).matches(n) = n ∉ S
//! And(rs).matches(n)    = every r in rs matches n   (empty = true)
//! Or(rs).matches(n)     = some r in rs matches n    (empty = false)
//! ```
//!
//! # Example
//!
//! ```
//! use facette::Relation;
//!
//! // Everything related to the price filter except price itself.
//! let relation = Relation::and([
//!     Relation::all(),
//!     Relation::exclude(["price"]),
//! ]);
//!
//! assert!(relation.matches("category"));
//! assert!(!relation.matches("price"));
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A composable predicate over filter names.
///
/// Relations are total over any string name and never fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// Matches every name.
    All,
    /// Matches every name not in the set.
    Exclude(BTreeSet<String>),
    /// Matches when all subrelations match. Empty matches everything.
    And(Vec<Relation>),
    /// Matches when any subrelation matches. Empty matches nothing.
    Or(Vec<Relation>),
}

impl Relation {
    /// The identity relation: matches every name.
    pub fn all() -> Self {
        Relation::All
    }

    /// Matches every name except the given ones.
    pub fn exclude<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Relation::Exclude(names.into_iter().map(Into::into).collect())
    }

    /// Conjunction of subrelations. `and([])` is equivalent to [`Relation::All`].
    pub fn and<I>(relations: I) -> Self
    where
        I: IntoIterator<Item = Relation>,
    {
        Relation::And(relations.into_iter().collect())
    }

    /// Disjunction of subrelations. `or([])` matches nothing.
    pub fn or<I>(relations: I) -> Self
    where
        I: IntoIterator<Item = Relation>,
    {
        Relation::Or(relations.into_iter().collect())
    }

    /// Tests whether the relation matches a filter name.
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Relation::All => true,
            Relation::Exclude(names) => !names.contains(name),
            Relation::And(relations) => relations.iter().all(|r| r.matches(name)),
            Relation::Or(relations) => relations.iter().any(|r| r.matches(name)),
        }
    }

    /// Collects every filter name the relation mentions literally.
    ///
    /// Used to validate a registry configuration: a relation referencing a
    /// name that was never registered is a misconfiguration, not a silently
    /// ignored no-op.
    pub fn referenced_names(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_names(&mut out);
        out
    }

    fn collect_names<'a>(&'a self, out: &mut BTreeSet<&'a str>) {
        match self {
            Relation::All => {}
            Relation::Exclude(names) => out.extend(names.iter().map(String::as_str)),
            Relation::And(relations) | Relation::Or(relations) => {
                for relation in relations {
                    relation.collect_names(out);
                }
            }
        }
    }
}

impl Default for Relation {
    fn default() -> Self {
        Relation::All
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_matches_everything() {
        assert!(Relation::all().matches("anything"));
        assert!(Relation::all().matches(""));
    }

    #[test]
    fn exclude_rejects_only_listed_names() {
        let relation = Relation::exclude(["price", "sort"]);
        assert!(!relation.matches("price"));
        assert!(!relation.matches("sort"));
        assert!(relation.matches("category"));
    }

    #[test]
    fn empty_exclude_is_all() {
        let relation = Relation::exclude(Vec::<String>::new());
        assert!(relation.matches("anything"));
    }

    #[test]
    fn empty_and_matches_everything() {
        assert!(Relation::and([]).matches("anything"));
    }

    #[test]
    fn empty_or_matches_nothing() {
        assert!(!Relation::or([]).matches("anything"));
    }

    #[test]
    fn and_requires_every_subrelation() {
        let relation = Relation::and([Relation::exclude(["a"]), Relation::exclude(["b"])]);
        assert!(!relation.matches("a"));
        assert!(!relation.matches("b"));
        assert!(relation.matches("c"));
    }

    #[test]
    fn or_requires_any_subrelation() {
        let relation = Relation::or([Relation::exclude(["a"]), Relation::exclude(["b"])]);
        // "a" is rejected by the first subrelation but accepted by the second.
        assert!(relation.matches("a"));
        assert!(relation.matches("c"));

        let both = Relation::or([Relation::exclude(["a"]), Relation::exclude(["a"])]);
        assert!(!both.matches("a"));
    }

    #[test]
    fn nested_composition() {
        let relation = Relation::and([
            Relation::all(),
            Relation::or([Relation::exclude(["x"]), Relation::or([])]),
        ]);
        assert!(!relation.matches("x"));
        assert!(relation.matches("y"));
    }

    #[test]
    fn referenced_names_walks_the_tree() {
        let relation = Relation::and([
            Relation::exclude(["a", "b"]),
            Relation::or([Relation::exclude(["c"]), Relation::all()]),
        ]);
        let names = relation.referenced_names();
        assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    }

    #[test]
    fn serde_round_trip() {
        let relation = Relation::and([Relation::all(), Relation::exclude(["price"])]);
        let json = serde_json::to_string(&relation).unwrap();
        let back: Relation = serde_json::from_str(&json).unwrap();
        assert_eq!(relation, back);
    }
}
