//! Payment gateway configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment gateway configuration (Razorpay-style order API)
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Gateway key ID (public half of the API credential pair)
    pub key_id: String,

    /// Gateway key secret; also signs the checkout callback
    pub key_secret: SecretString,

    /// Currency for created orders (3-letter ISO code)
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl PaymentConfig {
    /// Check if using gateway test credentials
    pub fn is_test_mode(&self) -> bool {
        self.key_id.starts_with("rzp_test_")
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_ID"));
        }
        if self.key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__KEY_SECRET"));
        }
        if self.currency.len() != 3 || !self.currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ValidationError::InvalidCurrency);
        }
        Ok(())
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            key_id: String::new(),
            key_secret: SecretString::new(String::new()),
            currency: default_currency(),
        }
    }
}

fn default_currency() -> String {
    "INR".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> PaymentConfig {
        PaymentConfig {
            key_id: "rzp_test_abc123".to_string(),
            key_secret: SecretString::new("secretvalue".to_string()),
            currency: "INR".to_string(),
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_is_test_mode() {
        assert!(valid_config().is_test_mode());

        let live = PaymentConfig {
            key_id: "rzp_live_abc123".to_string(),
            ..valid_config()
        };
        assert!(!live.is_test_mode());
    }

    #[test]
    fn test_missing_key_id_rejected() {
        let config = PaymentConfig {
            key_id: String::new(),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_key_secret_rejected() {
        let config = PaymentConfig {
            key_secret: SecretString::new(String::new()),
            ..valid_config()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_lowercase_currency_rejected() {
        let config = PaymentConfig {
            currency: "inr".to_string(),
            ..valid_config()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidCurrency)
        ));
    }
}
