//! Billing endpoints: credit balance, order creation, payment verification.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::BillingAppState;
pub use routes::billing_routes;
