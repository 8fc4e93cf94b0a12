//! Structured-query construction - the query translator.
//!
//! Each route's parameters become a Firestore `StructuredQuery`: a
//! collection selector plus optional field filter, sort order, and result
//! limit. The builder keeps handlers declarative:
//!
//! ```rust,ignore
//! let query = StructuredQuery::collection(PRODUCTS_COLLECTION)
//!     .filter("rating", FieldOperator::GreaterThanOrEqual, Value::DoubleValue(4.5))
//!     .order_by("rating", Direction::Descending)
//!     .limit(4);
//! ```

use serde::Serialize;

use super::types::Value;

/// A Firestore structured query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredQuery {
    /// Collections to query (always exactly one here).
    pub from: Vec<CollectionSelector>,
    /// Optional field filter.
    #[serde(rename = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// Sort order, applied in sequence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<Order>,
    /// Maximum number of results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
}

impl StructuredQuery {
    /// Start a query over a single collection.
    #[must_use]
    pub fn collection(collection_id: impl Into<String>) -> Self {
        Self {
            from: vec![CollectionSelector {
                collection_id: collection_id.into(),
            }],
            filter: None,
            order_by: Vec::new(),
            limit: None,
        }
    }

    /// Restrict results to documents whose `field` satisfies `op value`.
    #[must_use]
    pub fn filter(mut self, field: impl Into<String>, op: FieldOperator, value: Value) -> Self {
        self.filter = Some(Filter {
            field_filter: FieldFilter {
                field: FieldReference {
                    field_path: field.into(),
                },
                op,
                value,
            },
        });
        self
    }

    /// Append a sort key.
    #[must_use]
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by.push(Order {
            field: FieldReference {
                field_path: field.into(),
            },
            direction,
        });
        self
    }

    /// Cap the number of returned documents.
    #[must_use]
    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Selects a collection by ID under the query parent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSelector {
    /// The collection ID (last path segment, spaces allowed).
    pub collection_id: String,
}

/// A query filter. Only single-field filters are needed here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    /// The wrapped field filter.
    pub field_filter: FieldFilter,
}

/// A filter on a single document field.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldFilter {
    /// The field to compare.
    pub field: FieldReference,
    /// The comparison operator.
    pub op: FieldOperator,
    /// The comparison operand.
    pub value: Value,
}

/// Reference to a document field by dotted path.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldReference {
    /// The field path.
    pub field_path: String,
}

/// Field comparison operators used by this system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldOperator {
    /// Exact equality.
    Equal,
    /// `>=` comparison.
    GreaterThanOrEqual,
}

/// Sort direction for an [`Order`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Ascending order.
    Ascending,
    /// Descending order.
    Descending,
}

/// A single sort key.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// The field to sort by.
    pub field: FieldReference,
    /// The sort direction.
    pub direction: Direction,
}
