//! HTTP route handlers for the catalog API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health              - Liveness check
//! GET  /health/ready        - Readiness check (store round-trip)
//!
//! # Catalog
//! GET  /products            - Full product listing, title ascending
//! GET  /products/{id}       - Product by store-assigned ID
//! GET  /bestseller          - Up to 4 products rated >= 4.5, best first
//! GET  /latest              - Up to 4 newest products
//!
//! # Newsletter
//! POST /newsletter          - Subscribe an email address
//!
//! # Promo
//! POST /promotional-code    - Validate a promotional code for today
//! ```
//!
//! Every response body is JSON; errors are `{"error": "..."}`.

pub mod newsletter;
pub mod products;
pub mod promo;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product routes
        .nest("/products", product_routes())
        // Fixed-shape featured views
        .route("/bestseller", get(products::bestseller))
        .route("/latest", get(products::latest))
        // Newsletter signup
        .route("/newsletter", post(newsletter::subscribe))
        // Promo code validation
        .route("/promotional-code", post(promo::validate))
}
