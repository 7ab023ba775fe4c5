//! Clerk OIDC adapter for JWT verification.
//!
//! This adapter implements the `TokenVerifier` port against Clerk as the
//! identity provider. It verifies bearer tokens by:
//!
//! 1. Fetching JWKS from the issuer's well-known endpoint
//! 2. Verifying the JWT signature against the published public keys
//! 3. Validating issuer and expiry claims
//! 4. Mapping the subject claim to the domain `AuthenticatedCaller` type
//!
//! A token that merely decodes without signature verification is never
//! accepted.
//!
//! # Claims
//!
//! Clerk session tokens carry `iss`, `sub`, `exp`, `iat`, and `azp`, but no
//! `aud`; audience validation is therefore disabled and issuer validation is
//! the tenant check.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, AuthenticatedCaller, SubjectId};
use crate::ports::TokenVerifier;

/// Configuration for the Clerk OIDC adapter.
#[derive(Debug, Clone)]
pub struct ClerkConfig {
    /// The issuer URL, e.g. `https://fitting-ram-11.clerk.accounts.dev`.
    /// Used for JWKS discovery and issuer validation.
    pub issuer: String,

    /// How long to cache JWKS before refetching.
    pub jwks_cache_ttl: Duration,
}

impl ClerkConfig {
    pub fn new(issuer: impl Into<String>, jwks_cache_ttl: Duration) -> Self {
        Self {
            issuer: issuer.into(),
            jwks_cache_ttl,
        }
    }

    fn jwks_url(&self) -> String {
        format!(
            "{}/.well-known/jwks.json",
            self.issuer.trim_end_matches('/')
        )
    }
}

/// Claims this service reads from a Clerk session token.
#[derive(Debug, Deserialize)]
struct ClerkClaims {
    sub: String,
    #[allow(dead_code)]
    exp: i64,
}

/// Cached JWKS with expiry tracking.
struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    ttl: Duration,
}

impl JwksCache {
    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.ttl
    }
}

/// Clerk token verifier.
///
/// Keys are fetched lazily on first verification and cached; an expired
/// cache refetches on the next call.
pub struct ClerkTokenVerifier {
    config: ClerkConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl ClerkTokenVerifier {
    pub fn new(config: ClerkConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                AuthError::ServiceUnavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        })
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let url = self.config.jwks_url();

        tracing::debug!("Fetching JWKS from {}", url);

        let response = self.http_client.get(&url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch JWKS: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to fetch JWKS: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("JWKS endpoint returned {}", status);
            return Err(AuthError::ServiceUnavailable(format!(
                "JWKS endpoint returned {}",
                status
            )));
        }

        response.json().await.map_err(|e| {
            tracing::error!("Failed to parse JWKS: {}", e);
            AuthError::ServiceUnavailable(format!("Failed to parse JWKS: {}", e))
        })
    }

    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired() {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.jwks_cache.write().await;
            *cache = Some(JwksCache {
                jwks: jwks.clone(),
                fetched_at: Instant::now(),
                ttl: self.config.jwks_cache_ttl,
            });
        }

        Ok(jwks)
    }

    fn find_decoding_key(
        &self,
        header: &jsonwebtoken::Header,
        jwks: &JwkSet,
    ) -> Result<(DecodingKey, Algorithm), AuthError> {
        let kid = header.kid.as_ref().ok_or_else(|| {
            tracing::warn!("JWT missing 'kid' header");
            AuthError::InvalidToken
        })?;

        let jwk = jwks.find(kid).ok_or_else(|| {
            tracing::warn!("No matching key found for kid: {}", kid);
            AuthError::InvalidToken
        })?;

        let algorithm = match jwk.common.key_algorithm {
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS256) => Algorithm::RS256,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS384) => Algorithm::RS384,
            Some(jsonwebtoken::jwk::KeyAlgorithm::RS512) => Algorithm::RS512,
            Some(other) => {
                tracing::warn!("Unsupported algorithm: {:?}", other);
                return Err(AuthError::InvalidToken);
            }
            // Clerk publishes RS256 keys without an explicit alg
            None => Algorithm::RS256,
        };

        let decoding_key = DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!("Failed to create decoding key: {}", e);
            AuthError::InvalidToken
        })?;

        Ok((decoding_key, algorithm))
    }

    fn validate_token(
        &self,
        token: &str,
        decoding_key: &DecodingKey,
        algorithm: Algorithm,
    ) -> Result<ClerkClaims, AuthError> {
        let mut validation = Validation::new(algorithm);
        validation.set_issuer(&[&self.config.issuer]);
        validation.validate_exp = true;
        // Session tokens carry no aud claim
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        decode::<ClerkClaims>(token, decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                use jsonwebtoken::errors::ErrorKind;
                match e.kind() {
                    ErrorKind::ExpiredSignature => {
                        tracing::debug!("Token expired");
                        AuthError::TokenExpired
                    }
                    ErrorKind::InvalidIssuer => {
                        tracing::warn!("Invalid issuer in token");
                        AuthError::InvalidToken
                    }
                    _ => {
                        tracing::debug!("Token verification failed: {}", e);
                        AuthError::InvalidToken
                    }
                }
            })
    }
}

#[async_trait]
impl TokenVerifier for ClerkTokenVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedCaller, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Failed to decode JWT header: {}", e);
            AuthError::InvalidToken
        })?;

        let jwks = self.get_jwks().await?;
        let (decoding_key, algorithm) = self.find_decoding_key(&header, &jwks)?;
        let claims = self.validate_token(token, &decoding_key, algorithm)?;

        let subject = SubjectId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(AuthenticatedCaller::new(subject))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jwks_url_is_derived_from_issuer() {
        let config = ClerkConfig::new(
            "https://fitting-ram-11.clerk.accounts.dev/",
            Duration::from_secs(3600),
        );
        assert_eq!(
            config.jwks_url(),
            "https://fitting-ram-11.clerk.accounts.dev/.well-known/jwks.json"
        );
    }

    #[tokio::test]
    async fn garbage_token_is_rejected_before_any_fetch() {
        let verifier = ClerkTokenVerifier::new(ClerkConfig::new(
            "https://issuer.invalid",
            Duration::from_secs(3600),
        ))
        .unwrap();

        let err = verifier.verify("not-a-jwt").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }
}
