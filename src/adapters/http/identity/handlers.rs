//! HTTP handler for identity-provider webhooks.
//!
//! The webhook route carries no bearer auth; deliveries authenticate through
//! their signature headers, which the application handler verifies against
//! the raw body bytes.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;

use crate::application::handlers::identity::{SyncUserCommand, SyncUserHandler};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::identity::{IdentityWebhookVerifier, WebhookHeaders};
use crate::ports::UserRepository;

use super::super::error::{ApiError, StatusResponse};

/// Shared identity webhook state.
#[derive(Clone)]
pub struct IdentityAppState {
    pub webhook_verifier: IdentityWebhookVerifier,
    pub users: Arc<dyn UserRepository>,
}

impl IdentityAppState {
    pub fn sync_user_handler(&self) -> SyncUserHandler {
        SyncUserHandler::new(self.webhook_verifier.clone(), self.users.clone())
    }
}

fn required_header(headers: &HeaderMap, name: &'static str) -> Result<String, DomainError> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::ValidationFailed,
                format!("Missing webhook header: {}", name),
            )
        })
}

/// POST /api/webhooks/identity - Apply an identity-provider lifecycle event
pub async fn handle_identity_webhook(
    State(state): State<IdentityAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let webhook_headers = WebhookHeaders {
        message_id: required_header(&headers, "svix-id")?,
        timestamp: required_header(&headers, "svix-timestamp")?,
        signature: required_header(&headers, "svix-signature")?,
    };

    let handler = state.sync_user_handler();
    handler
        .handle(SyncUserCommand {
            headers: webhook_headers,
            payload: body.to_vec(),
        })
        .await?;

    Ok(Json(StatusResponse::ok("Webhook processed")))
}
