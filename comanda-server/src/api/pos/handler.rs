//! POS Tab API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::OrderView;
use crate::tabs::{CartOp, Tab, TabCheckout};
use crate::utils::AppResult;

#[derive(Debug, Serialize)]
pub struct TabListResponse {
    pub tabs: Vec<Tab>,
    pub active: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct CreateTabRequest {
    pub display_name: Option<String>,
}

/// GET /api/pos/{terminal}/tabs - all tabs of a terminal session
pub async fn list(
    State(state): State<ServerState>,
    Path(terminal): Path<String>,
) -> AppResult<Json<TabListResponse>> {
    let (tabs, active) = state.tabs.list_tabs(&terminal).await;
    Ok(Json(TabListResponse { tabs, active }))
}

/// POST /api/pos/{terminal}/tabs - open a new tab (becomes active)
pub async fn create(
    State(state): State<ServerState>,
    Path(terminal): Path<String>,
    payload: Option<Json<CreateTabRequest>>,
) -> AppResult<Json<Tab>> {
    let name = payload.and_then(|Json(p)| p.display_name);
    let tab = state.tabs.create_tab(&terminal, name).await;
    Ok(Json(tab))
}

/// POST /api/pos/{terminal}/tabs/{tab_id}/activate - switch the active tab
///
/// Unknown tab ids are a no-op; the response carries whichever tab is
/// active afterwards.
pub async fn activate(
    State(state): State<ServerState>,
    Path((terminal, tab_id)): Path<(String, String)>,
) -> AppResult<Json<TabListResponse>> {
    state.tabs.switch_tab(&terminal, &tab_id).await;
    let (tabs, active) = state.tabs.list_tabs(&terminal).await;
    Ok(Json(TabListResponse { tabs, active }))
}

/// DELETE /api/pos/{terminal}/tabs/{tab_id} - close a tab
///
/// Returns 409 when it is the last remaining tab.
pub async fn close(
    State(state): State<ServerState>,
    Path((terminal, tab_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    state.tabs.close_tab(&terminal, &tab_id).await?;
    Ok(Json(true))
}

/// POST /api/pos/{terminal}/tabs/{tab_id}/cart - mutate one tab's cart
pub async fn mutate_cart(
    State(state): State<ServerState>,
    Path((terminal, tab_id)): Path<(String, String)>,
    Json(op): Json<CartOp>,
) -> AppResult<Json<Tab>> {
    let tab = state.tabs.mutate_cart(&terminal, &tab_id, op).await?;
    Ok(Json(tab))
}

/// POST /api/pos/{terminal}/tabs/{tab_id}/checkout - promote the tab to an order
pub async fn checkout(
    State(state): State<ServerState>,
    Path((terminal, tab_id)): Path<(String, String)>,
    Json(payload): Json<TabCheckout>,
) -> AppResult<Json<OrderView>> {
    let order = state.tabs.checkout(&terminal, &tab_id, payload).await?;
    Ok(Json(order.into()))
}
