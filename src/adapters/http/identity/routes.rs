//! Axum router configuration for the identity webhook.

use axum::{routing::post, Router};

use super::handlers::{handle_identity_webhook, IdentityAppState};

/// Create the webhook router.
///
/// Separate from the billing routes because deliveries authenticate via
/// signature, not bearer tokens.
///
/// # Routes
///
/// - `POST /identity` - Identity-provider lifecycle events
pub fn webhook_routes() -> Router<IdentityAppState> {
    Router::new().route("/identity", post(handle_identity_webhook))
}
