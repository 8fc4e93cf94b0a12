//! Conversions from Firestore wire documents to domain types.
//!
//! The store owns these records; anything malformed in a stored document
//! surfaces as [`StoreError::Decode`] rather than panicking or silently
//! skipping fields.

use chrono::{DateTime, NaiveDate, Utc};

use clementine_core::{Email, ProductId, PromoId, Rating};

use super::types::{Document, Value};
use crate::store::types::{Product, PromoCode, Subscription};
use crate::store::StoreError;

/// Convert a `products` document into a [`Product`].
pub fn convert_product(doc: &Document) -> Result<Product, StoreError> {
    let title = str_field(doc, "title")?.to_owned();
    let rating = Rating::new(f64_field(doc, "rating")?)
        .map_err(|e| decode_error(doc, &format!("invalid rating: {e}")))?;
    let timestamp = timestamp_field(doc, "timestamp")?;

    Ok(Product {
        id: ProductId::new(doc.doc_id()),
        title,
        rating,
        timestamp,
    })
}

/// Convert a `Promo Codes` document into a [`PromoCode`].
pub fn convert_promo_code(doc: &Document) -> Result<PromoCode, StoreError> {
    let code = str_field(doc, "code")?.to_owned();
    let discount = f64_field(doc, "discount")?;
    let start_date = date_field(doc, "startDate")?;
    let end_date = date_field(doc, "endDate")?;

    Ok(PromoCode {
        id: PromoId::new(doc.doc_id()),
        code,
        discount,
        start_date,
        end_date,
    })
}

/// Convert an `emails` document into a [`Subscription`].
pub fn convert_subscription(doc: &Document) -> Result<Subscription, StoreError> {
    let email = Email::parse(str_field(doc, "email")?)
        .map_err(|e| decode_error(doc, &format!("invalid email: {e}")))?;
    let timestamp = timestamp_field(doc, "timestamp")?;

    Ok(Subscription { email, timestamp })
}

// =============================================================================
// Field Helpers
// =============================================================================

fn decode_error(doc: &Document, message: &str) -> StoreError {
    StoreError::Decode(format!("{}: {message}", doc.name))
}

fn field<'a>(doc: &'a Document, name: &str) -> Result<&'a Value, StoreError> {
    doc.field(name)
        .ok_or_else(|| decode_error(doc, &format!("missing field `{name}`")))
}

fn str_field<'a>(doc: &'a Document, name: &str) -> Result<&'a str, StoreError> {
    field(doc, name)?
        .as_str()
        .ok_or_else(|| decode_error(doc, &format!("field `{name}` is not a string")))
}

fn f64_field(doc: &Document, name: &str) -> Result<f64, StoreError> {
    field(doc, name)?
        .as_f64()
        .ok_or_else(|| decode_error(doc, &format!("field `{name}` is not numeric")))
}

fn date_field(doc: &Document, name: &str) -> Result<NaiveDate, StoreError> {
    field(doc, name)?
        .as_date()
        .ok_or_else(|| decode_error(doc, &format!("field `{name}` is not a YYYY-MM-DD date")))
}

fn timestamp_field(doc: &Document, name: &str) -> Result<DateTime<Utc>, StoreError> {
    field(doc, name)?
        .as_timestamp()
        .ok_or_else(|| decode_error(doc, &format!("field `{name}` is not a timestamp")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_convert_product() {
        let doc = doc(json!({
            "name": "projects/p/databases/(default)/documents/products/abc123",
            "fields": {
                "title": {"stringValue": "Clementine Crate"},
                "rating": {"doubleValue": 4.8},
                "timestamp": {"timestampValue": "2024-03-01T12:00:00Z"}
            }
        }));

        let product = convert_product(&doc).unwrap();
        assert_eq!(product.id.as_str(), "abc123");
        assert_eq!(product.title, "Clementine Crate");
        assert!((product.rating.value() - 4.8).abs() < f64::EPSILON);
        assert_eq!(product.timestamp.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn test_convert_product_missing_title() {
        let doc = doc(json!({
            "name": "projects/p/databases/(default)/documents/products/abc123",
            "fields": {
                "rating": {"doubleValue": 4.8},
                "timestamp": {"timestampValue": "2024-03-01T12:00:00Z"}
            }
        }));

        let err = convert_product(&doc).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
        assert!(err.to_string().contains("missing field `title`"));
    }

    #[test]
    fn test_convert_product_rating_out_of_scale() {
        let doc = doc(json!({
            "name": "projects/p/databases/(default)/documents/products/abc123",
            "fields": {
                "title": {"stringValue": "Clementine Crate"},
                "rating": {"doubleValue": 11.0},
                "timestamp": {"timestampValue": "2024-03-01T12:00:00Z"}
            }
        }));

        let err = convert_product(&doc).unwrap_err();
        assert!(err.to_string().contains("invalid rating"));
    }

    #[test]
    fn test_convert_promo_code_with_integer_discount() {
        let doc = doc(json!({
            "name": "projects/p/databases/(default)/documents/Promo Codes/promo1",
            "fields": {
                "code": {"stringValue": "WELCOME"},
                "discount": {"integerValue": "15"},
                "startDate": {"stringValue": "2024-01-01"},
                "endDate": {"stringValue": "2024-12-31"}
            }
        }));

        let promo = convert_promo_code(&doc).unwrap();
        assert_eq!(promo.id.as_str(), "promo1");
        assert_eq!(promo.code, "WELCOME");
        assert!((promo.discount - 15.0).abs() < f64::EPSILON);
        assert_eq!(promo.start_date, "2024-01-01".parse().unwrap());
        assert_eq!(promo.end_date, "2024-12-31".parse().unwrap());
    }

    #[test]
    fn test_convert_promo_code_bad_date() {
        let doc = doc(json!({
            "name": "projects/p/databases/(default)/documents/Promo Codes/promo1",
            "fields": {
                "code": {"stringValue": "WELCOME"},
                "discount": {"doubleValue": 15.0},
                "startDate": {"stringValue": "01/01/2024"},
                "endDate": {"stringValue": "2024-12-31"}
            }
        }));

        let err = convert_promo_code(&doc).unwrap_err();
        assert!(err.to_string().contains("startDate"));
    }

    #[test]
    fn test_convert_subscription() {
        let doc = doc(json!({
            "name": "projects/p/databases/(default)/documents/emails/user%40example.com",
            "fields": {
                "email": {"stringValue": "user@example.com"},
                "timestamp": {"timestampValue": "2024-03-01T12:00:00Z"}
            }
        }));

        let sub = convert_subscription(&doc).unwrap();
        assert_eq!(sub.email.as_str(), "user@example.com");
    }

    #[test]
    fn test_convert_subscription_corrupt_email() {
        let doc = doc(json!({
            "name": "projects/p/databases/(default)/documents/emails/bad",
            "fields": {
                "email": {"stringValue": "not-an-email"},
                "timestamp": {"timestampValue": "2024-03-01T12:00:00Z"}
            }
        }));

        let err = convert_subscription(&doc).unwrap_err();
        assert!(err.to_string().contains("invalid email"));
    }
}
