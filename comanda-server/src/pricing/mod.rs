//! Pricing module
//!
//! - [`money`] - exact decimal arithmetic helpers
//! - [`verifier`] - cart reconciliation against the catalog index and order
//!   totals computation

pub mod money;
pub mod verifier;

pub use verifier::{CheckoutError, VerifyError, compute_totals, reconcile};
