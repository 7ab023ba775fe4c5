//! Mock token verifier for testing.
//!
//! Implements the `TokenVerifier` port without a real identity provider.
//!
//! # Example
//!
//! ```ignore
//! use creditline::adapters::auth::MockTokenVerifier;
//!
//! let verifier = MockTokenVerifier::new().with_subject("valid-token", "user_2abc");
//! let caller = verifier.verify("valid-token").await?;
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedCaller, SubjectId};
use crate::ports::TokenVerifier;

/// Mock token verifier.
///
/// Stores a map of tokens to subjects. Tokens not in the map return
/// `InvalidToken`.
#[derive(Debug, Default)]
pub struct MockTokenVerifier {
    tokens: RwLock<HashMap<String, SubjectId>>,
    force_error: RwLock<Option<AuthError>>,
}

impl MockTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token that verifies to the given subject.
    pub fn with_subject(self, token: impl Into<String>, subject: &str) -> Self {
        let subject = SubjectId::new(subject).expect("test subject id");
        self.tokens.write().unwrap().insert(token.into(), subject);
        self
    }

    /// Forces all verifications to return the specified error.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap() = Some(error);
        self
    }
}

#[async_trait]
impl TokenVerifier for MockTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedCaller, AuthError> {
        if let Some(err) = self.force_error.read().unwrap().clone() {
            return Err(err);
        }

        self.tokens
            .read()
            .unwrap()
            .get(token)
            .cloned()
            .map(AuthenticatedCaller::new)
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn known_token_resolves_subject() {
        let verifier = MockTokenVerifier::new().with_subject("token-1", "user_2abc");

        let caller = verifier.verify("token-1").await.unwrap();
        assert_eq!(caller.subject.as_str(), "user_2abc");
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let verifier = MockTokenVerifier::new();
        assert!(matches!(
            verifier.verify("nope").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[tokio::test]
    async fn forced_error_overrides_lookup() {
        let verifier = MockTokenVerifier::new()
            .with_subject("token-1", "user_2abc")
            .with_error(AuthError::ServiceUnavailable("down".to_string()));

        assert!(matches!(
            verifier.verify("token-1").await,
            Err(AuthError::ServiceUnavailable(_))
        ));
    }
}
