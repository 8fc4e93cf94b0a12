//! Domain types for the document store.
//!
//! These types provide a clean, ergonomic API separate from the raw
//! Firestore wire types in [`super::firestore`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use clementine_core::{Email, ProductId, PromoId, Rating};

// =============================================================================
// Product Types
// =============================================================================

/// A catalog product.
///
/// Owned and mutated only by the external store; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned document ID.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Rating on the 0.0-5.0 scale.
    pub rating: Rating,
    /// Creation-order marker.
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Promo Code Types
// =============================================================================

/// A stored promotional code with its validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoCode {
    /// Store-assigned document ID.
    pub id: PromoId,
    /// The code customers enter, matched case-sensitively.
    pub code: String,
    /// Discount percentage.
    pub discount: f64,
    /// First calendar day the code is valid (inclusive).
    pub start_date: NaiveDate,
    /// Last calendar day the code is valid (inclusive).
    pub end_date: NaiveDate,
}

impl PromoCode {
    /// Whether the validity window contains `today`.
    ///
    /// Both bounds are inclusive: a code starting and ending today is
    /// active today.
    #[must_use]
    pub fn is_active_on(&self, today: NaiveDate) -> bool {
        self.start_date <= today && today <= self.end_date
    }
}

// =============================================================================
// Newsletter Types
// =============================================================================

/// A newsletter email subscription.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// The subscribed address.
    pub email: Email,
    /// When the subscription was created (server-generated).
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn promo(start: &str, end: &str) -> PromoCode {
        PromoCode {
            id: PromoId::new("p1"),
            code: "WELCOME".to_string(),
            discount: 15.0,
            start_date: start.parse().unwrap(),
            end_date: end.parse().unwrap(),
        }
    }

    #[test]
    fn test_window_contains_today() {
        let code = promo("2024-01-01", "2024-12-31");
        assert!(code.is_active_on("2024-06-15".parse().unwrap()));
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let code = promo("2024-01-01", "2024-12-31");
        assert!(code.is_active_on("2024-01-01".parse().unwrap()));
        assert!(code.is_active_on("2024-12-31".parse().unwrap()));
    }

    #[test]
    fn test_window_excludes_outside() {
        let code = promo("2024-01-01", "2024-12-31");
        assert!(!code.is_active_on("2023-12-31".parse().unwrap()));
        assert!(!code.is_active_on("2025-01-01".parse().unwrap()));
    }

    #[test]
    fn test_single_day_window() {
        let code = promo("2024-06-15", "2024-06-15");
        assert!(code.is_active_on("2024-06-15".parse().unwrap()));
        assert!(!code.is_active_on("2024-06-16".parse().unwrap()));
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let product = Product {
            id: ProductId::new("abc123"),
            title: "Clementine Crate".to_string(),
            rating: Rating::new(4.5).unwrap(),
            timestamp: "2024-03-01T12:00:00Z".parse().unwrap(),
        };

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], "abc123");
        assert_eq!(json["title"], "Clementine Crate");
        assert_eq!(json["rating"], 4.5);
        assert!(json["timestamp"].as_str().unwrap().starts_with("2024-03-01"));
    }
}
