//! Identity webhook signature verification.
//!
//! The provider signs deliveries Svix-style: base64 HMAC-SHA256 over
//! `{id}.{timestamp}.{payload}`, keyed by the base64-decoded portion of the
//! `whsec_` signing secret. The signature header may carry several
//! space-separated `v1,<base64>` candidates (key rotation); verification
//! succeeds if any candidate matches in constant time.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed age for webhook deliveries (5 minutes).
const MAX_EVENT_AGE_SECS: i64 = 300;

/// Maximum allowed clock skew for future timestamps (1 minute).
const MAX_CLOCK_SKEW_SECS: i64 = 60;

/// Errors from identity webhook verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WebhookError {
    #[error("Missing webhook header: {0}")]
    MissingHeader(&'static str),

    #[error("Invalid webhook timestamp")]
    InvalidTimestamp,

    #[error("Webhook timestamp outside tolerance")]
    TimestampOutOfRange,

    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Webhook signing secret is malformed")]
    InvalidSecret,
}

/// The three provider-supplied headers that authenticate a delivery.
#[derive(Debug, Clone)]
pub struct WebhookHeaders {
    pub message_id: String,
    pub timestamp: String,
    pub signature: String,
}

/// Verifier for identity-provider webhook deliveries.
#[derive(Clone, Debug)]
pub struct IdentityWebhookVerifier {
    key: Vec<u8>,
}

impl IdentityWebhookVerifier {
    /// Creates a verifier from the shared signing secret.
    ///
    /// The secret's `whsec_` prefix is stripped and the remainder base64
    /// decoded, matching the provider's key format.
    pub fn new(secret: &str) -> Result<Self, WebhookError> {
        let encoded = secret.strip_prefix("whsec_").unwrap_or(secret);
        let key = BASE64
            .decode(encoded)
            .map_err(|_| WebhookError::InvalidSecret)?;
        Ok(Self { key })
    }

    /// Verifies a delivery against its headers and raw body.
    ///
    /// # Verification Steps
    ///
    /// 1. Validate the timestamp is within tolerance
    /// 2. Compute HMAC-SHA256 over `id.timestamp.payload`
    /// 3. Compare against each `v1` candidate in constant time
    pub fn verify(&self, headers: &WebhookHeaders, payload: &[u8]) -> Result<(), WebhookError> {
        let timestamp: i64 = headers
            .timestamp
            .parse()
            .map_err(|_| WebhookError::InvalidTimestamp)?;

        self.validate_timestamp(timestamp)?;

        let expected = self.compute_signature(&headers.message_id, &headers.timestamp, payload);

        for candidate in headers.signature.split(' ') {
            // Candidates are "<version>,<base64 signature>"
            let Some((version, value)) = candidate.split_once(',') else {
                continue;
            };
            if version != "v1" {
                continue;
            }
            let Ok(provided) = BASE64.decode(value) else {
                continue;
            };
            if expected.ct_eq(provided.as_slice()).unwrap_u8() == 1 {
                return Ok(());
            }
        }

        Err(WebhookError::InvalidSignature)
    }

    fn validate_timestamp(&self, timestamp: i64) -> Result<(), WebhookError> {
        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        if age > MAX_EVENT_AGE_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }
        if age < -MAX_CLOCK_SKEW_SECS {
            return Err(WebhookError::TimestampOutOfRange);
        }
        Ok(())
    }

    fn compute_signature(&self, message_id: &str, timestamp: &str, payload: &[u8]) -> Vec<u8> {
        let mut mac =
            HmacSha256::new_from_slice(&self.key).expect("HMAC can take key of any size");
        mac.update(message_id.as_bytes());
        mac.update(b".");
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }

    /// Signs a payload the way the provider would. Test helper for building
    /// valid deliveries.
    #[doc(hidden)]
    pub fn sign(&self, message_id: &str, timestamp: &str, payload: &[u8]) -> String {
        format!(
            "v1,{}",
            BASE64.encode(self.compute_signature(message_id, timestamp, payload))
        )
    }
}
