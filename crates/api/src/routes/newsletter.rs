//! Newsletter subscription route handler.
//!
//! Subscribing is a single conditional write: the subscription document is
//! keyed by the normalized address, so the store - not a check-then-insert
//! sequence - enforces at-most-once per address, including under
//! concurrent signups for the same email.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use clementine_core::Email;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::StoreError;

/// Newsletter subscription request body.
#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    /// The address to subscribe; absent is treated as empty.
    #[serde(default)]
    pub email: String,
}

/// Newsletter subscription success body.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    /// Confirmation message.
    pub message: String,
}

/// Subscribe an email address to the newsletter.
///
/// Returns 400 with a JSON error for a malformed address or an address
/// that is already registered, 500 on store failure.
#[instrument(skip(state), fields(email = %body.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> Result<Json<SubscribeResponse>> {
    let email = Email::parse(&body.email).map_err(|e| AppError::BadRequest(e.to_string()))?;

    match state.store().create_subscription(&email).await {
        Ok(subscription) => {
            tracing::info!(email = %subscription.email, "Newsletter subscription created");
            Ok(Json(SubscribeResponse {
                message: "Email saved successfully".to_string(),
            }))
        }
        Err(StoreError::AlreadyExists(_)) => {
            tracing::info!(email = %email, "Duplicate newsletter signup rejected");
            Err(AppError::BadRequest(
                "This email is already registered.".to_string(),
            ))
        }
        Err(e) => Err(e.into()),
    }
}
