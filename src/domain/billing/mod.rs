//! Billing domain: credit plans, purchase transactions, and the checkout
//! signature scheme.

mod checkout_signature;
mod plan;
mod transaction;

pub use checkout_signature::{CheckoutSignatureVerifier, SignatureError};
pub use plan::Plan;
pub use transaction::Transaction;
