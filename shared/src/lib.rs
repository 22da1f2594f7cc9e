//! Shared types for the Comanda ordering platform
//!
//! Common types exchanged between the server and its front ends (web
//! storefront, mobile app, POS terminal, admin portal): order status and the
//! per-fulfillment-type state machine, cart line types, the unified error
//! code space, and small utilities.

pub mod error;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Order re-exports (for convenient access)
pub use error::{ErrorCategory, ErrorCode};
pub use order::{CartLine, Customer, OrderStatus, OrderTotals, OrderType, ReconciledLine};
