//! Checkout API Handlers

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use shared::{CartLine, ReconciledLine};

use crate::core::ServerState;
use crate::pricing;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub cart: Vec<CartLine>,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub verified_cart: Vec<ReconciledLine>,
    /// True when any line was repriced against the catalog
    pub price_changed: bool,
}

/// POST /api/checkout/verify - reconcile a client cart against the catalog
///
/// Returns the repriced cart so the UI can show "price changed since you
/// added this" before the customer commits.
pub async fn verify(
    State(state): State<ServerState>,
    Json(payload): Json<VerifyRequest>,
) -> AppResult<Json<VerifyResponse>> {
    let index = state.catalog.index().await?;
    let verified_cart = pricing::reconcile(&payload.cart, &index)?;
    let price_changed = verified_cart.iter().any(|l| l.price_modified);
    Ok(Json(VerifyResponse {
        verified_cart,
        price_changed,
    }))
}
