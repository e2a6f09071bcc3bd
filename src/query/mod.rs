//! Typed query model produced by the interpreter and consumed by catalog
//! stores.
//!
//! A [`FilterFragment`] is assembled incrementally by the interpreter
//! stages: each stage that finds a signal merges its constraint in, stages
//! that find nothing contribute nothing. The final fragment plus a
//! [`SortSpec`] and pagination window form a complete catalog query.

use serde::{Deserialize, Serialize};

/// A single field constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Constraint {
    /// Exact, case-insensitive equality.
    Equals { value: String },
    /// Set membership: the field (a string set) contains any of the values.
    AnyIn { values: Vec<String> },
    /// Numeric range; at least one bound is set.
    Range {
        min: Option<f64>,
        max: Option<f64>,
    },
    /// Case-insensitive substring match.
    Contains { value: String },
    /// Case-insensitive substring match against any of the values.
    ContainsAny { values: Vec<String> },
}

/// A constraint bound to a field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraint {
    /// Target document field ("price", "brand", "tags", ...).
    pub field: String,
    /// The constraint applied to that field.
    pub constraint: Constraint,
}

impl FieldConstraint {
    /// Create a new field constraint.
    pub fn new<S: Into<String>>(field: S, constraint: Constraint) -> Self {
        FieldConstraint {
            field: field.into(),
            constraint,
        }
    }
}

/// A partial filter over catalog documents.
///
/// `clauses` are ANDed together; `any_of` is a single OR group ANDed with
/// the rest (used for the feature match: tags OR description).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterFragment {
    /// Conjunctive constraints.
    pub clauses: Vec<FieldConstraint>,
    /// One disjunctive group; a document must satisfy at least one entry
    /// when the group is non-empty.
    pub any_of: Vec<FieldConstraint>,
}

impl FilterFragment {
    /// Create an empty fragment.
    pub fn new() -> Self {
        FilterFragment::default()
    }

    /// Merge a constraint in, replacing any existing clause on the same
    /// field. Later pipeline stages own their fields outright.
    pub fn insert<S: Into<String>>(&mut self, field: S, constraint: Constraint) {
        let field = field.into();
        self.clauses.retain(|c| c.field != field);
        self.clauses.push(FieldConstraint::new(field, constraint));
    }

    /// Replace the OR group.
    pub fn set_any_of(&mut self, group: Vec<FieldConstraint>) {
        self.any_of = group;
    }

    /// Look up the clause for a field, if any.
    pub fn get(&self, field: &str) -> Option<&Constraint> {
        self.clauses
            .iter()
            .find(|c| c.field == field)
            .map(|c| &c.constraint)
    }

    /// Whether the fragment constrains anything at all.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.any_of.is_empty()
    }
}

/// Fields the catalog can sort on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    Price,
    Rating,
    CreatedAt,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// A complete sort specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Field to sort on.
    pub field: SortField,
    /// Direction.
    pub order: SortOrder,
}

impl SortSpec {
    /// Create a new sort specification.
    pub fn new(field: SortField, order: SortOrder) -> Self {
        SortSpec { field, order }
    }

    /// Ascending price, the storefront default.
    pub fn price_ascending() -> Self {
        SortSpec::new(SortField::Price, SortOrder::Asc)
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        SortSpec::price_ascending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_same_field() {
        let mut filter = FilterFragment::new();
        filter.insert(
            "price",
            Constraint::Range {
                min: None,
                max: Some(500.0),
            },
        );
        filter.insert(
            "price",
            Constraint::Range {
                min: Some(100.0),
                max: Some(500.0),
            },
        );

        assert_eq!(filter.clauses.len(), 1);
        assert_eq!(
            filter.get("price"),
            Some(&Constraint::Range {
                min: Some(100.0),
                max: Some(500.0),
            })
        );
    }

    #[test]
    fn test_empty_fragment() {
        let mut filter = FilterFragment::new();
        assert!(filter.is_empty());

        filter.set_any_of(vec![FieldConstraint::new(
            "tags",
            Constraint::AnyIn {
                values: vec!["wireless".into()],
            },
        )]);
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_serializes_for_logging() {
        let mut filter = FilterFragment::new();
        filter.insert(
            "brand",
            Constraint::Contains {
                value: "nike".into(),
            },
        );

        let json = serde_json::to_value(&filter).unwrap();
        assert_eq!(json["clauses"][0]["field"], "brand");
        assert_eq!(json["clauses"][0]["constraint"]["op"], "contains");
    }
}
