//! Authentication configuration
//!
//! Covers both inbound surfaces that carry identity-provider credentials:
//! bearer tokens on API calls (verified against the provider's JWKS) and
//! signed lifecycle webhooks (verified with the shared signing secret).

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration (identity provider)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Identity provider issuer URL (used for JWKS discovery and `iss` validation)
    pub issuer: String,

    /// Webhook signing secret shared with the identity provider (whsec_...)
    pub webhook_secret: SecretString,

    /// JWKS cache TTL in seconds
    #[serde(default = "default_jwks_cache_ttl")]
    pub jwks_cache_ttl_secs: u64,
}

impl AuthConfig {
    /// Get JWKS cache TTL as Duration
    pub fn jwks_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.jwks_cache_ttl_secs)
    }

    /// Validate authentication configuration
    ///
    /// In production, requires HTTPS for the issuer URL.
    /// In development, allows localhost with HTTP.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.issuer.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__ISSUER"));
        }
        if self.webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__WEBHOOK_SECRET"));
        }
        if !self.webhook_secret.expose_secret().starts_with("whsec_") {
            return Err(ValidationError::InvalidWebhookSecret);
        }

        if *environment == Environment::Production && !self.issuer.starts_with("https://") {
            return Err(ValidationError::IssuerMustBeHttps);
        }

        Ok(())
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer: String::new(),
            webhook_secret: SecretString::new(String::new()),
            jwks_cache_ttl_secs: default_jwks_cache_ttl(),
        }
    }
}

fn default_jwks_cache_ttl() -> u64 {
    3600
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AuthConfig {
        AuthConfig {
            issuer: "https://auth.example.com".to_string(),
            webhook_secret: SecretString::new("whsec_abc123".to_string()),
            jwks_cache_ttl_secs: 3600,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_missing_issuer_rejected() {
        let config = AuthConfig {
            issuer: String::new(),
            ..valid_config()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_webhook_secret_prefix_enforced() {
        let config = AuthConfig {
            webhook_secret: SecretString::new("plain-secret".to_string()),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidWebhookSecret)
        ));
    }

    #[test]
    fn test_http_issuer_rejected_in_production() {
        let config = AuthConfig {
            issuer: "http://auth.example.com".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::IssuerMustBeHttps)
        ));
        assert!(config.validate(&Environment::Development).is_ok());
    }
}
