//! Caller identity and authentication errors.

use thiserror::Error;

use super::ids::SubjectId;

/// The verified identity of an API caller.
///
/// Produced only by a [`crate::ports::TokenVerifier`] implementation after
/// full token verification; handlers can trust the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    /// Identity-provider subject id of the caller.
    pub subject: SubjectId,
}

impl AuthenticatedCaller {
    pub fn new(subject: SubjectId) -> Self {
        Self { subject }
    }
}

/// Errors from bearer-token verification.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Token has expired")]
    TokenExpired,

    #[error("Token is invalid")]
    InvalidToken,

    #[error("Authentication service unavailable: {0}")]
    ServiceUnavailable(String),
}
