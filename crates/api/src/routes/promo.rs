//! Promotional-code validation route handler.
//!
//! The store query only narrows by exact code match; the actual decision -
//! which record, if any, is valid today - happens in-process in
//! [`select_active`].

use axum::{Json, extract::State};
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::store::PromoCode;

/// Promo validation request body.
#[derive(Debug, Deserialize)]
pub struct ValidateRequest {
    /// The code to validate; absent is treated as the empty string, which
    /// matches nothing.
    #[serde(default)]
    pub code: String,
}

/// Promo validation success body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    /// Always `true` on the success path.
    pub valid: bool,
    /// Discount percentage of the winning record.
    pub discount: f64,
    /// The validated code.
    pub code: String,
    /// First valid day of the winning record (inclusive).
    pub start_date: NaiveDate,
    /// Last valid day of the winning record (inclusive).
    pub end_date: NaiveDate,
}

/// Validate a promotional code against today's date (UTC).
///
/// Returns 404 with a JSON error when no stored record with this code is
/// valid today; discarded records are never revealed.
#[instrument(skip(state), fields(code = %body.code))]
pub async fn validate(
    State(state): State<AppState>,
    Json(body): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>> {
    // Calendar date only, in the fixed reference timezone (UTC).
    let today = Utc::now().date_naive();

    let candidates = state.store().promo_codes(&body.code).await?;

    let winner = select_active(candidates, today)
        .ok_or_else(|| AppError::NotFound("Invalid promotional code".to_string()))?;

    Ok(Json(ValidateResponse {
        valid: true,
        discount: winner.discount,
        code: winner.code,
        start_date: winner.start_date,
        end_date: winner.end_date,
    }))
}

/// Pick the winning promo record for `today`.
///
/// Discards records whose window does not contain `today`, then orders the
/// survivors by latest start date, highest discount, and document ID.
/// Store-returned order is never load-bearing, so the same stored data
/// always resolves to the same record.
fn select_active(candidates: Vec<PromoCode>, today: NaiveDate) -> Option<PromoCode> {
    candidates
        .into_iter()
        .filter(|promo| promo.is_active_on(today))
        .max_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.discount.total_cmp(&b.discount))
                .then_with(|| b.id.cmp(&a.id))
        })
}
