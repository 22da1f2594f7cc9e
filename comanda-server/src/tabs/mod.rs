//! POS tab sessions
//!
//! One terminal operator juggling several concurrent in-progress orders.
//! Tabs live in memory only: a tab becomes an order at checkout and is
//! discarded, never persisted as-is.

pub mod manager;

pub use manager::{CartOp, Tab, TabCheckout, TabError, TabManager};
