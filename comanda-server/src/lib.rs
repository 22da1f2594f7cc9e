//! Comanda Server: restaurant ordering and POS back end
//!
//! # Architecture
//!
//! One authoritative implementation of the order integrity core, shared by
//! every front end (web storefront, mobile app, POS terminal, admin portal):
//!
//! - **Catalog** (`catalog`): recursive section tree flattened into an
//!   indexed map with invalidation-driven caching
//! - **Pricing** (`pricing`): server-side cart reconciliation against
//!   authoritative prices and exact decimal totals
//! - **Orders** (`orders`): immutable order snapshots and the per-type
//!   status state machine with compare-and-swap transitions
//! - **Tabs** (`tabs`): multi-tab POS terminal sessions
//! - **Database** (`db`): embedded SurrealDB storage
//! - **HTTP API** (`api`): axum routes for all of the above
//!
//! # Module structure
//!
//! ```text
//! comanda-server/src/
//! ├── core/       # configuration, state, server
//! ├── api/        # HTTP routes and handlers
//! ├── catalog/    # catalog index and cached service
//! ├── pricing/    # money helpers and the price verifier
//! ├── orders/     # order lifecycle service
//! ├── tabs/       # POS tab sessions
//! ├── settings/   # settings singleton service
//! ├── db/         # models and repositories
//! └── utils/      # errors, logging
//! ```

pub mod api;
pub mod catalog;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod settings;
pub mod tabs;
pub mod utils;

// Re-export public types
pub use catalog::{CatalogIndex, CatalogService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderService;
pub use tabs::TabManager;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
   ______
  / ____/___  ____ ___  ____ _____  ____/ /___ _
 / /   / __ \/ __ `__ \/ __ `/ __ \/ __  / __ `/
/ /___/ /_/ / / / / / / /_/ / / / / /_/ / /_/ /
\____/\____/_/ /_/ /_/\__,_/_/ /_/\__,_/\__,_/
    "#
    );
}
