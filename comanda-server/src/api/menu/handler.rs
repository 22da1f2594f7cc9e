//! Menu API Handlers

use axum::{Json, extract::State};

use crate::catalog::MenuSection;
use crate::core::ServerState;
use crate::utils::AppResult;

/// GET /api/menu - the full section tree with nested children and items
pub async fn menu(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuSection>>> {
    let tree = state.catalog.menu_tree().await?;
    Ok(Json(tree))
}
