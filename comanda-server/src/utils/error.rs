//! Unified error handling
//!
//! Provides the application-level error type and response envelope:
//! - [`AppError`] - application error enum, converted to an HTTP response
//! - [`AppResponse`] - API response structure
//!
//! Domain modules define their own `thiserror` enums (`RepoError`,
//! `VerifyError`, `CheckoutError`, `OrderError`, `TabError`) and convert into
//! `AppError` next to their definitions, so the precise
//! [`ErrorCode`](shared::ErrorCode) (and with it the error *category* the
//! client reacts to) survives to the wire.
//!
//! # Usage
//!
//! ```ignore
//! // Return an error
//! Err(AppError::not_found("Order ORD-20260101-10001"))
//!
//! // Return a success envelope
//! Ok(ok(data))
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use shared::ErrorCode;
use tracing::error;

/// Unified API response structure
///
/// ```json
/// {
///   "code": "E0000",
///   "category": "validation",
///   "message": "...",
///   "data": { ... }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct AppResponse<T> {
    /// Error code (E0000 means success)
    pub code: String,
    /// Error category (absent on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<&'static str>,
    /// Message
    pub message: String,
    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Application-level error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Caller Errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Resource conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Domain error carrying its precise shared error code
    #[error("{message}")]
    Domain { code: ErrorCode, message: String },

    // ========== System Errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn domain(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::Domain {
            code,
            message: message.into(),
        }
    }

    /// The shared error code this error surfaces as
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Conflict(_) => ErrorCode::AlreadyExists,
            AppError::Validation(_) => ErrorCode::ValidationFailed,
            AppError::Domain { code, .. } => *code,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let status =
            StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // System errors: log details, never leak them to the client
        let message = match &self {
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                "Database error".to_string()
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(AppResponse::<()> {
            code: code.to_string(),
            category: Some(code.category().name()),
            message,
            data: None,
        });

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Result type for HTTP handlers and application logic
pub type AppResult<T> = Result<T, AppError>;

// ========== Helper functions ==========

/// Create a successful response
pub fn ok<T: Serialize>(data: T) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: ErrorCode::Success.to_string(),
        category: None,
        message: "Success".to_string(),
        data: Some(data),
    })
}

/// Create a successful response with custom message
pub fn ok_with_message<T: Serialize>(data: T, message: impl Into<String>) -> Json<AppResponse<T>> {
    Json(AppResponse {
        code: ErrorCode::Success.to_string(),
        category: None,
        message: message.into(),
        data: Some(data),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_keeps_code() {
        let err = AppError::domain(ErrorCode::ItemUnavailable, "Item menu_item:a1 is unavailable");
        assert_eq!(err.code(), ErrorCode::ItemUnavailable);
        assert_eq!(err.code().http_status(), 422);
    }

    #[test]
    fn test_category_surfaces_in_envelope() {
        let err = AppError::domain(ErrorCode::StaleStatus, "status changed underneath you");
        assert_eq!(err.code().category().name(), "conflict");
    }
}
