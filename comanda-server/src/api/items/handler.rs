//! Menu Item Admin API Handlers
//!
//! Price and availability edits invalidate the catalog index cache; they
//! take effect for all future reconciliations, never for historical orders.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{MenuItemCreate, MenuItemUpdate, MenuItemView};
use crate::utils::{AppError, AppResult};

/// GET /api/items - all menu items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItemView>>> {
    let items = state
        .catalog
        .items()
        .find_all()
        .await
        .map_err(AppError::from)?;
    Ok(Json(items.into_iter().map(MenuItemView::from).collect()))
}

/// GET /api/items/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<MenuItemView>> {
    let item = state
        .catalog
        .items()
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Menu item {} not found", id)))?;
    Ok(Json(item.into()))
}

/// POST /api/items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItemView>> {
    let item = state
        .catalog
        .items()
        .create(payload)
        .await
        .map_err(AppError::from)?;
    state.catalog.invalidate();
    Ok(Json(item.into()))
}

/// PUT /api/items/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItemView>> {
    let item = state
        .catalog
        .items()
        .update(&id, payload)
        .await
        .map_err(AppError::from)?;
    state.catalog.invalidate();
    Ok(Json(item.into()))
}

/// DELETE /api/items/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let result = state
        .catalog
        .items()
        .delete(&id)
        .await
        .map_err(AppError::from)?;
    state.catalog.invalidate();
    Ok(Json(result))
}
