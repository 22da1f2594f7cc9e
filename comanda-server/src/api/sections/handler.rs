//! Section Admin API Handlers
//!
//! Every mutation invalidates the catalog index cache so the next
//! reconciliation sees the edit.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{SectionCreate, SectionUpdate, SectionView};
use crate::utils::{AppError, AppResult};

/// GET /api/sections - all sections (flat arena order)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SectionView>>> {
    let sections = state
        .catalog
        .sections()
        .find_all()
        .await
        .map_err(AppError::from)?;
    Ok(Json(sections.into_iter().map(SectionView::from).collect()))
}

/// GET /api/sections/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SectionView>> {
    let section = state
        .catalog
        .sections()
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Section {} not found", id)))?;
    Ok(Json(section.into()))
}

/// POST /api/sections
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SectionCreate>,
) -> AppResult<Json<SectionView>> {
    let section = state
        .catalog
        .sections()
        .create(payload)
        .await
        .map_err(AppError::from)?;
    state.catalog.invalidate();
    Ok(Json(section.into()))
}

/// PUT /api/sections/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SectionUpdate>,
) -> AppResult<Json<SectionView>> {
    let section = state
        .catalog
        .sections()
        .update(&id, payload)
        .await
        .map_err(AppError::from)?;
    state.catalog.invalidate();
    Ok(Json(section.into()))
}

/// DELETE /api/sections/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = state
        .catalog
        .sections()
        .delete(&id)
        .await
        .map_err(AppError::from)?;
    state.catalog.invalidate();
    Ok(Json(result))
}
