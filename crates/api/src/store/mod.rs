//! Document-store collaborator for the catalog, newsletter, and promo data.
//!
//! # Architecture
//!
//! - The store is a hosted Firestore database reached over its REST surface
//! - The store is source of truth - NO local persistence, direct API calls
//! - One client, constructed at startup from configuration and injected via
//!   application state (no process-global handle)
//! - No in-process caching: every request performs a fresh store call
//!
//! # Collections
//!
//! Collection names are preserved from the store as deployed:
//!
//! - `products` - catalog products
//! - `emails` - newsletter subscriptions, keyed by normalized address
//! - `Promo Codes` - promotional codes (historical name, includes a space)
//!
//! # Example
//!
//! ```rust,ignore
//! use clementine_api::store::FirestoreClient;
//!
//! let store = FirestoreClient::new(&config.firestore);
//!
//! // List the catalog
//! let products = store.list_products().await?;
//!
//! // Validate a promo code
//! let candidates = store.promo_codes("WELCOME").await?;
//! ```

mod firestore;
pub mod types;

pub use firestore::FirestoreClient;
pub use types::*;

use thiserror::Error;

/// Collection holding catalog products.
pub const PRODUCTS_COLLECTION: &str = "products";
/// Collection holding newsletter subscriptions.
pub const EMAILS_COLLECTION: &str = "emails";
/// Collection holding promotional codes.
pub const PROMO_CODES_COLLECTION: &str = "Promo Codes";

/// Errors that can occur when interacting with the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store returned a non-success status.
    #[error("Store API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the store.
        status: u16,
        /// Error message reported by the store.
        message: String,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A stored document is missing fields or holds the wrong types.
    #[error("Malformed document: {0}")]
    Decode(String),

    /// Document not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conditional create failed because the document already exists.
    #[error("Already exists: {0}")]
    AlreadyExists(String),
}
