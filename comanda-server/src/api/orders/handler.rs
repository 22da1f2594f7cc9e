//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use shared::{CartLine, Customer, OrderStatus, OrderType};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::OrderView;
use crate::orders::NewOrder;
use crate::utils::{AppError, AppResult};

/// Query params for listing orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Checkout payload from the storefront or mobile app
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub items: Vec<CartLine>,
    pub order_type: OrderType,
    pub payment_method: String,
    pub customer_name: Option<String>,
    #[validate(email)]
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
}

/// Staff status transition payload
///
/// `expected_status` is what the dashboard last displayed; the transition is
/// compare-and-swapped against it. When omitted, the currently stored
/// status is read and used as the expectation.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: OrderStatus,
    pub expected_status: Option<OrderStatus>,
}

/// Staff cancel payload
#[derive(Debug, Deserialize, Default)]
pub struct CancelRequest {
    pub expected_status: Option<OrderStatus>,
}

/// GET /api/orders - staff listing, optionally filtered by status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderView>>> {
    let orders = state
        .orders
        .repo()
        .find_all(query.status, query.limit, query.offset)
        .await
        .map_err(AppError::from)?;
    Ok(Json(orders.into_iter().map(OrderView::from).collect()))
}

/// POST /api/orders - create an order from an untrusted cart
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<OrderView>> {
    payload.validate()?;

    let customer = match (&payload.customer_name, &payload.customer_phone) {
        (None, None) => None,
        (name, phone) => Some(Customer {
            name: name.clone().unwrap_or_default(),
            email: payload.customer_email.clone(),
            phone: phone.clone().unwrap_or_default(),
        }),
    };

    let order = state
        .orders
        .create_order(NewOrder {
            cart: payload.items,
            order_type: payload.order_type,
            payment_method: payload.payment_method,
            customer,
            address: payload.address,
            notes: payload.notes,
        })
        .await?;

    Ok(Json(order.into()))
}

/// GET /api/orders/{order_number} - customer-facing tracking
pub async fn get_by_number(
    State(state): State<ServerState>,
    Path(order_number): Path<String>,
) -> AppResult<Json<OrderView>> {
    let order = state
        .orders
        .repo()
        .find_by_order_number(&order_number)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", order_number)))?;
    Ok(Json(order.into()))
}

/// PATCH /api/orders/{id} - staff-driven status transition
///
/// Returns 409 on an illegal transition or a lost compare-and-swap.
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateStatusRequest>,
) -> AppResult<Json<OrderView>> {
    let order = state
        .orders
        .transition(&id, payload.status, payload.expected_status)
        .await?;
    Ok(Json(order.into()))
}

/// POST /api/orders/{id}/cancel - cancel from any non-terminal state
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    payload: Option<Json<CancelRequest>>,
) -> AppResult<Json<OrderView>> {
    let expected = payload.and_then(|Json(p)| p.expected_status);
    let order = state.orders.cancel(&id, expected).await?;
    Ok(Json(order.into()))
}
