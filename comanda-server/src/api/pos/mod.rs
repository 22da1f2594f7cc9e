//! POS Tab API module
//!
//! Endpoints used by the POS terminal to juggle several concurrent
//! in-progress orders before any of them becomes a committed order.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pos/{terminal}/tabs", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{tab_id}", axum::routing::delete(handler::close))
        .route("/{tab_id}/activate", post(handler::activate))
        .route("/{tab_id}/cart", post(handler::mutate_cart))
        .route("/{tab_id}/checkout", post(handler::checkout))
}
