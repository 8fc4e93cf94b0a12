//! Product route handlers.
//!
//! Each handler is one templated store query plus JSON shaping; the sort
//! keys, the result cap, and the bestseller threshold are fixed inside the
//! store client.

use axum::{
    Json,
    extract::{Path, State},
};

use clementine_core::ProductId;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::{Product, StoreError};

/// List every product, sorted by title ascending.
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.store().list_products().await?;
    Ok(Json(products))
}

/// Look up a single product by its store-assigned ID.
///
/// The ID from the path is opaque and passed through unvalidated; an
/// unresolvable ID is a 404, not a 400.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>> {
    let id = ProductId::new(id);

    let product = state.store().get_product(&id).await.map_err(|e| match e {
        StoreError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
        other => AppError::Store(other),
    })?;

    Ok(Json(product))
}

/// Up to four products rated at least 4.5, best-rated first.
pub async fn bestseller(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.store().bestsellers().await?;
    Ok(Json(products))
}

/// Up to four most recently created products, newest first.
pub async fn latest(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = state.store().latest().await?;
    Ok(Json(products))
}
