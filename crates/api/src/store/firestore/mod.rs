//! Firestore REST client implementation.
//!
//! Uses `reqwest` for HTTP against the Firestore REST surface
//! (`runQuery`, `get`, `createDocument`). Queries are built with the
//! [`queries::StructuredQuery`] translator and results converted through
//! [`conversions`] into the domain types in [`crate::store::types`].
//!
//! The newsletter insert is a conditional create: the document ID is
//! derived from the normalized address, so a duplicate signup fails at the
//! store with `ALREADY_EXISTS` instead of racing a separate existence
//! check.

mod conversions;
pub mod queries;
pub mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::Utc;
use reqwest::StatusCode;
use secrecy::ExposeSecret;
use tracing::instrument;

use clementine_core::{Email, ProductId};

use crate::config::FirestoreConfig;
use crate::store::types::{Product, PromoCode, Subscription};
use crate::store::{
    EMAILS_COLLECTION, PRODUCTS_COLLECTION, PROMO_CODES_COLLECTION, StoreError,
};

use conversions::{convert_product, convert_promo_code, convert_subscription};
use queries::{Direction, FieldOperator, StructuredQuery};
use types::{ApiErrorBody, Document, NewDocument, RunQueryItem, RunQueryRequest, Value};

/// Result cap for the bestseller and latest views. Fixed policy.
const FEATURED_LIMIT: i32 = 4;
/// Minimum rating for a product to count as a bestseller. Fixed policy.
const BESTSELLER_MIN_RATING: f64 = 4.5;

// =============================================================================
// FirestoreClient
// =============================================================================

/// Client for the Firestore document store.
///
/// Provides typed access to products, newsletter subscriptions, and promo
/// codes. Cheaply cloneable; every handler call performs a fresh store
/// round-trip (the store is the sole persistence authority).
#[derive(Clone)]
pub struct FirestoreClient {
    inner: Arc<FirestoreClientInner>,
}

struct FirestoreClientInner {
    client: reqwest::Client,
    /// Parent resource URL ending in `/documents`.
    documents_url: String,
    api_key: String,
}

impl FirestoreClient {
    /// Create a new Firestore client from configuration.
    ///
    /// Honors the endpoint override (emulator support); otherwise targets
    /// the hosted REST endpoint for the configured project.
    #[must_use]
    pub fn new(config: &FirestoreConfig) -> Self {
        let documents_url = config.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://firestore.googleapis.com/v1/projects/{}/databases/(default)/documents",
                config.project_id
            )
        });

        Self {
            inner: Arc::new(FirestoreClientInner {
                client: reqwest::Client::new(),
                documents_url,
                api_key: config.api_key.expose_secret().to_string(),
            }),
        }
    }

    // =========================================================================
    // Low-level REST calls
    // =========================================================================

    /// Run a structured query against the database and collect the
    /// returned documents.
    async fn run_query(&self, query: StructuredQuery) -> Result<Vec<Document>, StoreError> {
        let url = format!("{}:runQuery", self.inner.documents_url);

        let response = self
            .inner
            .client
            .post(&url)
            .query(&[("key", self.inner.api_key.as_str())])
            .json(&RunQueryRequest {
                structured_query: query,
            })
            .send()
            .await?;

        let body = check_status(response).await?;
        let items: Vec<RunQueryItem> = serde_json::from_str(&body)?;

        // The trailing element of a runQuery response carries only a read
        // time, no document.
        Ok(items.into_iter().filter_map(|item| item.document).collect())
    }

    /// Fetch a single document by collection and ID.
    async fn get_document(
        &self,
        collection: &str,
        document_id: &str,
    ) -> Result<Document, StoreError> {
        let url = format!(
            "{}/{}/{}",
            self.inner.documents_url,
            collection,
            urlencoding::encode(document_id)
        );

        let response = self
            .inner
            .client
            .get(&url)
            .query(&[("key", self.inner.api_key.as_str())])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(format!("{collection}/{document_id}")));
        }

        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Create a document with a caller-chosen ID.
    ///
    /// Firestore rejects the write with `ALREADY_EXISTS` when a document
    /// with that ID is present, which makes this an atomic
    /// insert-if-absent.
    async fn create_document(
        &self,
        collection: &str,
        document_id: &str,
        document: NewDocument,
    ) -> Result<Document, StoreError> {
        let url = format!("{}/{}", self.inner.documents_url, collection);

        let response = self
            .inner
            .client
            .post(&url)
            .query(&[
                ("key", self.inner.api_key.as_str()),
                ("documentId", document_id),
            ])
            .json(&document)
            .send()
            .await?;

        if response.status() == StatusCode::CONFLICT {
            return Err(StoreError::AlreadyExists(format!(
                "{collection}/{document_id}"
            )));
        }

        let body = check_status(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// List every product, sorted by title ascending.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails or a stored product is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let query =
            StructuredQuery::collection(PRODUCTS_COLLECTION).order_by("title", Direction::Ascending);

        let docs = self.run_query(query).await?;
        docs.iter().map(convert_product).collect()
    }

    /// Get a product by its store-assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the ID does not resolve.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn get_product(&self, id: &ProductId) -> Result<Product, StoreError> {
        let doc = self.get_document(PRODUCTS_COLLECTION, id.as_str()).await?;
        convert_product(&doc)
    }

    /// Up to four products rated at least 4.5, best-rated first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails or a stored product is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn bestsellers(&self) -> Result<Vec<Product>, StoreError> {
        let query = StructuredQuery::collection(PRODUCTS_COLLECTION)
            .filter(
                "rating",
                FieldOperator::GreaterThanOrEqual,
                Value::DoubleValue(BESTSELLER_MIN_RATING),
            )
            .order_by("rating", Direction::Descending)
            .limit(FEATURED_LIMIT);

        let docs = self.run_query(query).await?;
        docs.iter().map(convert_product).collect()
    }

    /// Up to four most recently created products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails or a stored product is
    /// malformed.
    #[instrument(skip(self))]
    pub async fn latest(&self) -> Result<Vec<Product>, StoreError> {
        let query = StructuredQuery::collection(PRODUCTS_COLLECTION)
            .order_by("timestamp", Direction::Descending)
            .limit(FEATURED_LIMIT);

        let docs = self.run_query(query).await?;
        docs.iter().map(convert_product).collect()
    }

    // =========================================================================
    // Newsletter Methods
    // =========================================================================

    /// Atomically create a newsletter subscription for `email`.
    ///
    /// The document ID is the percent-encoded normalized address, so the
    /// store enforces at-most-once per address.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::AlreadyExists` if the address is already
    /// subscribed.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn create_subscription(&self, email: &Email) -> Result<Subscription, StoreError> {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), Value::string(email.as_str()));
        fields.insert("timestamp".to_string(), Value::timestamp(Utc::now()));

        let document_id = urlencoding::encode(email.as_str()).into_owned();
        let doc = self
            .create_document(EMAILS_COLLECTION, &document_id, NewDocument { fields })
            .await?;

        convert_subscription(&doc)
    }

    // =========================================================================
    // Promo Code Methods
    // =========================================================================

    /// All stored promo records whose `code` field equals `code` exactly
    /// (case-sensitive). Window filtering happens in the resolver, not
    /// here.
    ///
    /// # Errors
    ///
    /// Returns an error if the store call fails or a stored record is
    /// malformed.
    #[instrument(skip(self), fields(code = %code))]
    pub async fn promo_codes(&self, code: &str) -> Result<Vec<PromoCode>, StoreError> {
        let query = StructuredQuery::collection(PROMO_CODES_COLLECTION).filter(
            "code",
            FieldOperator::Equal,
            Value::string(code),
        );

        let docs = self.run_query(query).await?;
        docs.iter().map(convert_promo_code).collect()
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Cheapest possible store round-trip, for readiness checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unreachable.
    pub async fn ping(&self) -> Result<(), StoreError> {
        let query = StructuredQuery::collection(PRODUCTS_COLLECTION).limit(1);
        self.run_query(query).await.map(|_| ())
    }
}

/// Resolve a non-success response into a `StoreError::Api`, logging the
/// (truncated) body for diagnostics without exposing it upstream.
async fn check_status(response: reqwest::Response) -> Result<String, StoreError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %body.chars().take(500).collect::<String>(),
            "Store returned non-success status"
        );
        let message = serde_json::from_str::<ApiErrorBody>(&body).map_or_else(
            |_| body.chars().take(200).collect(),
            |parsed| parsed.error.message,
        );
        return Err(StoreError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(body)
}
