//! Firestore REST wire types.
//!
//! Firestore documents carry typed values: every field is an object with a
//! single type-discriminating key, e.g. `{"stringValue": "Clementine"}`.
//! The externally-tagged [`Value`] enum maps onto that shape directly.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Field Values
// =============================================================================

/// A typed Firestore field value.
///
/// Only the value kinds this system stores or reads are modeled; documents
/// carrying other kinds in unrelated fields still deserialize because
/// conversion only touches known fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    /// Explicit null.
    NullValue(Option<()>),
    /// Boolean.
    BooleanValue(bool),
    /// 64-bit integer, transported as a decimal string.
    IntegerValue(String),
    /// Double-precision float.
    DoubleValue(f64),
    /// RFC 3339 timestamp.
    TimestampValue(String),
    /// UTF-8 string.
    StringValue(String),
}

impl Value {
    /// Build a string value.
    #[must_use]
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringValue(s.into())
    }

    /// Build a timestamp value from a UTC datetime.
    #[must_use]
    pub fn timestamp(ts: DateTime<Utc>) -> Self {
        Self::TimestampValue(ts.to_rfc3339())
    }

    /// View this value as a string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::StringValue(s) => Some(s),
            _ => None,
        }
    }

    /// View this value as a float.
    ///
    /// Accepts both `doubleValue` and `integerValue`, since the store
    /// stores whole-number ratings and discounts as integers.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::DoubleValue(v) => Some(*v),
            Self::IntegerValue(raw) => raw.parse().ok(),
            _ => None,
        }
    }

    /// Parse this value as a UTC timestamp.
    #[must_use]
    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::TimestampValue(raw) => DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|ts| ts.with_timezone(&Utc)),
            _ => None,
        }
    }

    /// Parse this value as a `YYYY-MM-DD` calendar date.
    ///
    /// Promo windows are stored as plain date strings, not timestamps.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::StringValue(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok(),
            _ => None,
        }
    }
}

// =============================================================================
// Documents
// =============================================================================

/// A Firestore document as returned by the REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name:
    /// `projects/{p}/databases/{d}/documents/{collection}/{id}`.
    pub name: String,
    /// Field map; absent for empty documents.
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    /// Server-reported creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_time: Option<String>,
    /// Server-reported last-update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<String>,
}

impl Document {
    /// The document ID: the final segment of the resource name.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }

    /// Look up a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}

/// Body for `createDocument`: a document without a resource name.
#[derive(Debug, Clone, Serialize)]
pub struct NewDocument {
    /// Field map for the new document.
    pub fields: BTreeMap<String, Value>,
}

// =============================================================================
// Request / Response Envelopes
// =============================================================================

/// Body for a `runQuery` call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryRequest {
    /// The query to run against the parent's collections.
    pub structured_query: super::queries::StructuredQuery,
}

/// One element of a `runQuery` response array.
///
/// The final element often carries only a read time and no document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunQueryItem {
    /// The matched document, if this element carries one.
    #[serde(default)]
    pub document: Option<Document>,
}

/// Error envelope returned by the Firestore REST API.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    /// The error detail.
    pub error: ApiErrorDetail,
}

/// Detail of a Firestore REST API error.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// Numeric status code.
    #[serde(default)]
    pub code: i64,
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Canonical status name, e.g. `ALREADY_EXISTS`.
    #[serde(default)]
    pub status: String,
}
