//! Order API module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        // Customers track by order number; staff patch the status by record id
        .route(
            "/{id}",
            get(handler::get_by_number).patch(handler::update_status),
        )
        .route("/{id}/cancel", post(handler::cancel))
}
