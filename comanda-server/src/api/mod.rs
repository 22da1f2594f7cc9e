//! API routing module
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`menu`] - public menu tree
//! - [`checkout`] - cart verification
//! - [`orders`] - order creation, tracking, staff transitions
//! - [`sections`] - catalog section admin
//! - [`items`] - menu item admin
//! - [`settings`] - settings singleton
//! - [`pos`] - POS terminal tab sessions

pub mod checkout;
pub mod health;
pub mod items;
pub mod menu;
pub mod orders;
pub mod pos;
pub mod sections;
pub mod settings;

use crate::core::ServerState;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};

/// Build a router with all routes registered (no middleware)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(menu::router())
        .merge(checkout::router())
        .merge(orders::router())
        .merge(sections::router())
        .merge(items::router())
        .merge(settings::router())
        .merge(pos::router())
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // CORS - the web storefront and admin portal are separate origins
        .layer(CorsLayer::permissive())
        // Trace - request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
