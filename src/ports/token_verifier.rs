//! Token verifier port.
//!
//! Defines the contract for validating bearer tokens issued by the identity
//! provider and extracting the caller they were issued to.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedCaller};

/// Port for bearer token validation.
///
/// Implementations verify the token cryptographically against the issuer's
/// published keys and check its standard claims. A token that merely decodes
/// is not enough.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify a bearer token and return the authenticated caller.
    ///
    /// # Errors
    ///
    /// - `TokenExpired` for tokens past their expiry
    /// - `InvalidToken` for signature, issuer, or claim failures
    /// - `ServiceUnavailable` when the issuer's keys cannot be fetched
    async fn verify(&self, token: &str) -> Result<AuthenticatedCaller, AuthError>;
}
