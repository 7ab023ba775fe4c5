//! Checkout callback signature verification.
//!
//! The gateway signs completed checkouts with a hex-encoded HMAC-SHA256 over
//! `order_id|payment_id`, keyed by the API key secret. Verification recomputes
//! the digest and compares in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors from checkout signature verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Invalid payment signature")]
    InvalidSignature,

    #[error("Signature is not valid hex")]
    MalformedSignature,
}

/// Verifier for gateway checkout signatures.
#[derive(Clone)]
pub struct CheckoutSignatureVerifier {
    secret: Vec<u8>,
}

impl CheckoutSignatureVerifier {
    /// Creates a verifier keyed with the gateway key secret.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
        }
    }

    /// Computes the expected signature for an (order, payment) pair.
    pub fn compute(&self, order_id: &str, payment_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Verifies a gateway-supplied signature.
    ///
    /// The comparison runs over raw digest bytes in constant time; a signature
    /// that is not valid hex fails before comparison.
    pub fn verify(
        &self,
        order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<(), SignatureError> {
        let provided = hex::decode(signature).map_err(|_| SignatureError::MalformedSignature)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .expect("HMAC can take key of any size");
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        let expected = mac.finalize().into_bytes();

        if expected.as_slice().ct_eq(provided.as_slice()).unwrap_u8() != 1 {
            return Err(SignatureError::InvalidSignature);
        }

        Ok(())
    }
}
