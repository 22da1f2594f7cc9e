//! Unified error codes for the Comanda platform
//!
//! All front ends and the server share one error code space so a client can
//! react to a failure class without parsing message text. Codes are organized
//! by category:
//! - 0xxx: validation (caller can self-correct the request)
//! - 1xxx: catalog integrity (client's view of the catalog is stale)
//! - 2xxx: business rule rejections (threshold included in the message)
//! - 3xxx: order lifecycle conflicts
//! - 4xxx: POS tab session errors
//! - 9xxx: system errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Codes are represented as u16 values for efficient serialization and
/// cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: Validation ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 6,
    /// Cart is empty
    EmptyCart = 10,
    /// Quantity must be a positive integer
    InvalidQuantity = 11,

    // ==================== 1xxx: Catalog integrity ====================
    /// Cart references an item the catalog does not know
    ItemNotFound = 1001,
    /// Item exists but is currently unavailable
    ItemUnavailable = 1002,
    /// Section would become its own ancestor
    SectionCycle = 1003,
    /// Section still referenced by children or items
    SectionInUse = 1004,

    // ==================== 2xxx: Business rules ====================
    /// Delivery subtotal below the configured minimum
    BelowMinimumOrder = 2001,
    /// Delivery requested while delivery is disabled
    DeliveryDisabled = 2002,

    // ==================== 3xxx: Order lifecycle ====================
    /// Order not found
    OrderNotFound = 3001,
    /// Requested transition is not legal from the current status
    InvalidTransition = 3002,
    /// Order already in a terminal status
    AlreadyTerminal = 3003,
    /// Compare-and-swap on status lost against a concurrent writer
    StaleStatus = 3004,

    // ==================== 4xxx: POS tabs ====================
    /// Tab not found in this terminal session
    TabNotFound = 4001,
    /// The last remaining tab cannot be closed
    CannotCloseLastTab = 4002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Raw u16 value of this code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// HTTP status this code maps to at the API boundary
    pub fn http_status(&self) -> u16 {
        match self.category() {
            ErrorCategory::Validation => match self {
                ErrorCode::Success => 200,
                ErrorCode::NotFound => 404,
                ErrorCode::AlreadyExists => 409,
                _ => 400,
            },
            ErrorCategory::Integrity => 422,
            ErrorCategory::BusinessRule => 422,
            ErrorCategory::Conflict => match self {
                ErrorCode::OrderNotFound | ErrorCode::TabNotFound => 404,
                _ => 409,
            },
            ErrorCategory::System => 500,
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> u16 {
        code as u16
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => ErrorCode::Success,
            1 => ErrorCode::Unknown,
            2 => ErrorCode::ValidationFailed,
            3 => ErrorCode::NotFound,
            4 => ErrorCode::AlreadyExists,
            5 => ErrorCode::InvalidRequest,
            6 => ErrorCode::RequiredField,
            10 => ErrorCode::EmptyCart,
            11 => ErrorCode::InvalidQuantity,
            1001 => ErrorCode::ItemNotFound,
            1002 => ErrorCode::ItemUnavailable,
            1003 => ErrorCode::SectionCycle,
            1004 => ErrorCode::SectionInUse,
            2001 => ErrorCode::BelowMinimumOrder,
            2002 => ErrorCode::DeliveryDisabled,
            3001 => ErrorCode::OrderNotFound,
            3002 => ErrorCode::InvalidTransition,
            3003 => ErrorCode::AlreadyTerminal,
            3004 => ErrorCode::StaleStatus,
            4001 => ErrorCode::TabNotFound,
            4002 => ErrorCode::CannotCloseLastTab,
            9001 => ErrorCode::InternalError,
            9002 => ErrorCode::DatabaseError,
            _ => return Err(format!("unknown error code: {}", value)),
        };
        Ok(code)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

/// Error category classification based on error code ranges
///
/// - validation: the caller can self-correct and resubmit
/// - integrity: the client's view of the catalog is stale; refresh and re-prompt
/// - business_rule: rejected by configuration (threshold in the message)
/// - conflict: concurrent-state conflict; re-fetch and retry if still valid
/// - system: nothing was committed; generic failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Validation errors (0xxx)
    Validation,
    /// Catalog integrity errors (1xxx)
    Integrity,
    /// Business rule rejections (2xxx)
    BusinessRule,
    /// Lifecycle and session conflicts (3xxx, 4xxx)
    Conflict,
    /// System errors (9xxx)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::Validation,
            1000..2000 => Self::Integrity,
            2000..3000 => Self::BusinessRule,
            3000..5000 => Self::Conflict,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Integrity => "integrity",
            Self::BusinessRule => "business_rule",
            Self::Conflict => "conflict",
            Self::System => "system",
        }
    }
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_code() {
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::Validation);
        assert_eq!(ErrorCategory::from_code(11), ErrorCategory::Validation);
        assert_eq!(ErrorCategory::from_code(1001), ErrorCategory::Integrity);
        assert_eq!(ErrorCategory::from_code(2002), ErrorCategory::BusinessRule);
        assert_eq!(ErrorCategory::from_code(3004), ErrorCategory::Conflict);
        assert_eq!(ErrorCategory::from_code(4002), ErrorCategory::Conflict);
        assert_eq!(ErrorCategory::from_code(9001), ErrorCategory::System);
        assert_eq!(ErrorCategory::from_code(10000), ErrorCategory::System);
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::EmptyCart.category(), ErrorCategory::Validation);
        assert_eq!(ErrorCode::ItemNotFound.category(), ErrorCategory::Integrity);
        assert_eq!(
            ErrorCode::BelowMinimumOrder.category(),
            ErrorCategory::BusinessRule
        );
        assert_eq!(ErrorCode::StaleStatus.category(), ErrorCategory::Conflict);
        assert_eq!(
            ErrorCode::CannotCloseLastTab.category(),
            ErrorCategory::Conflict
        );
        assert_eq!(ErrorCode::DatabaseError.category(), ErrorCategory::System);
    }

    #[test]
    fn test_http_status() {
        assert_eq!(ErrorCode::EmptyCart.http_status(), 400);
        assert_eq!(ErrorCode::NotFound.http_status(), 404);
        assert_eq!(ErrorCode::ItemUnavailable.http_status(), 422);
        assert_eq!(ErrorCode::BelowMinimumOrder.http_status(), 422);
        assert_eq!(ErrorCode::StaleStatus.http_status(), 409);
        assert_eq!(ErrorCode::OrderNotFound.http_status(), 404);
        assert_eq!(ErrorCode::CannotCloseLastTab.http_status(), 409);
        assert_eq!(ErrorCode::InternalError.http_status(), 500);
    }

    #[test]
    fn test_code_roundtrip() {
        for code in [
            ErrorCode::EmptyCart,
            ErrorCode::ItemNotFound,
            ErrorCode::BelowMinimumOrder,
            ErrorCode::StaleStatus,
            ErrorCode::CannotCloseLastTab,
            ErrorCode::DatabaseError,
        ] {
            let raw: u16 = code.into();
            assert_eq!(ErrorCode::try_from(raw).unwrap(), code);
        }
        assert!(ErrorCode::try_from(1234).is_err());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::ItemNotFound.to_string(), "E1001");
        assert_eq!(ErrorCode::InternalError.to_string(), "E9001");
    }
}
