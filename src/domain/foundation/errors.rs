//! Error types for the domain layer.

use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidPlan,

    // Not found errors
    UserNotFound,

    // Settlement soft failures (reported, never escalated)
    TransactionNotFound,
    AlreadySettled,
    OrderNotPaid,

    // Authentication errors
    Unauthorized,
    InvalidSignature,

    // Infrastructure errors
    GatewayError,
    DatabaseError,
    InternalError,
}

impl ErrorCode {
    /// Soft failures are reported as `success: false` without a non-2xx
    /// status. They only arise in the settlement flow, where a replayed or
    /// unresolvable callback is an expected answer.
    pub fn is_soft_failure(&self) -> bool {
        matches!(
            self,
            ErrorCode::TransactionNotFound | ErrorCode::AlreadySettled | ErrorCode::OrderNotPaid
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidPlan => "INVALID_PLAN",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::TransactionNotFound => "TRANSACTION_NOT_FOUND",
            ErrorCode::AlreadySettled => "ALREADY_SETTLED",
            ErrorCode::OrderNotPaid => "ORDER_NOT_PAID",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::InvalidSignature => "INVALID_SIGNATURE",
            ErrorCode::GatewayError => "GATEWAY_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code and message.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Creates a database error from a storage failure.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Creates an invalid-signature error.
    pub fn invalid_signature(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidSignature, message)
    }

    /// Creates a gateway error from a provider or transport failure.
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::GatewayError, message)
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::TransactionNotFound, "Transaction not found");
        assert_eq!(
            format!("{}", err),
            "[TRANSACTION_NOT_FOUND] Transaction not found"
        );
    }

    #[test]
    fn soft_failure_codes() {
        assert!(ErrorCode::AlreadySettled.is_soft_failure());
        assert!(ErrorCode::OrderNotPaid.is_soft_failure());
        assert!(ErrorCode::TransactionNotFound.is_soft_failure());
        assert!(!ErrorCode::UserNotFound.is_soft_failure());
        assert!(!ErrorCode::InvalidSignature.is_soft_failure());
        assert!(!ErrorCode::DatabaseError.is_soft_failure());
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::InvalidPlan), "INVALID_PLAN");
        assert_eq!(format!("{}", ErrorCode::InternalError), "INTERNAL_ERROR");
    }
}
