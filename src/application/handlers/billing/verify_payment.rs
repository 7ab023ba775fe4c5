//! VerifyPaymentHandler - Checkout callback signature check.

use crate::domain::billing::{CheckoutSignatureVerifier, SignatureError};
use crate::domain::foundation::DomainError;

/// Command carrying the gateway's checkout callback triple.
#[derive(Debug, Clone)]
pub struct VerifyPaymentCommand {
    pub order_id: String,
    pub payment_id: String,
    pub signature: String,
}

/// Handler for checkout signature verification.
///
/// Pure computation over the injected key secret; settlement composes this
/// before touching any state.
pub struct VerifyPaymentHandler {
    verifier: CheckoutSignatureVerifier,
}

impl VerifyPaymentHandler {
    pub fn new(verifier: CheckoutSignatureVerifier) -> Self {
        Self { verifier }
    }

    pub fn handle(&self, cmd: &VerifyPaymentCommand) -> Result<(), DomainError> {
        self.verifier
            .verify(&cmd.order_id, &cmd.payment_id, &cmd.signature)
            .map_err(|e| match e {
                SignatureError::InvalidSignature | SignatureError::MalformedSignature => {
                    DomainError::invalid_signature("Payment signature verification failed")
                }
            })
    }
}
