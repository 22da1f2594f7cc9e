//! Settings API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::{SettingsUpdate, SettingsView};
use crate::utils::{AppError, AppResult};

/// GET /api/settings
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<SettingsView>> {
    Ok(Json(state.settings.get().into()))
}

/// PUT /api/settings - partial merge; applies to subsequent orders only
pub async fn update(
    State(state): State<ServerState>,
    Json(payload): Json<SettingsUpdate>,
) -> AppResult<Json<SettingsView>> {
    let updated = state
        .settings
        .update(payload)
        .await
        .map_err(AppError::from)?;
    Ok(Json(updated.into()))
}
