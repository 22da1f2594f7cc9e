//! Utility module: error types and logging
//!
//! - [`AppError`] - application error type surfaced at the HTTP boundary
//! - [`AppResponse`] - unified API response envelope
//! - logging setup

pub mod error;
pub mod logger;

pub use error::{AppError, AppResponse, AppResult, ok, ok_with_message};
