//! Axum router configuration for billing endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_order, get_credits, verify_payment, BillingAppState};

/// Create the billing API router.
///
/// # Routes (all require authentication)
///
/// - `GET /credits` - Current caller's credit balance
/// - `POST /orders` - Open a purchase order for a credit bundle
/// - `POST /payments/verify` - Verify a checkout callback and settle it
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/credits", get(get_credits))
        .route("/orders", post(create_order))
        .route("/payments/verify", post(verify_payment))
}
