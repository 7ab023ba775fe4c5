//! SyncUserHandler - Command handler for identity-provider webhooks.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::domain::identity::{
    IdentityEvent, IdentityWebhookVerifier, User, WebhookError, WebhookHeaders,
};
use crate::ports::UserRepository;

/// Command carrying a raw webhook delivery.
///
/// The payload stays as the exact bytes received; the signature covers them,
/// so any re-serialization would break verification.
#[derive(Debug, Clone)]
pub struct SyncUserCommand {
    pub headers: WebhookHeaders,
    pub payload: Vec<u8>,
}

/// What a delivery did to the local mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Created,
    Updated,
    Deleted,
    /// Acknowledged without a state change: an unrecognized event kind, or a
    /// mutation aimed at a subject with no local record.
    Ignored,
}

/// Handler for identity webhook deliveries.
///
/// Verifies the delivery signature, parses the lifecycle event, and applies
/// it to the user mirror. Replays and out-of-order deliveries must converge:
/// a repeated "created" upserts instead of failing, and mutations for unknown
/// subjects are acknowledged without effect.
pub struct SyncUserHandler {
    verifier: IdentityWebhookVerifier,
    users: Arc<dyn UserRepository>,
}

impl SyncUserHandler {
    pub fn new(verifier: IdentityWebhookVerifier, users: Arc<dyn UserRepository>) -> Self {
        Self { verifier, users }
    }

    pub async fn handle(&self, cmd: SyncUserCommand) -> Result<SyncOutcome, DomainError> {
        self.verifier
            .verify(&cmd.headers, &cmd.payload)
            .map_err(map_webhook_error)?;

        match IdentityEvent::parse(&cmd.payload)? {
            IdentityEvent::Created { subject, fields } => {
                let user = User::from_provider(subject.clone(), fields);
                self.users.upsert(&user).await?;
                tracing::info!(subject = %subject, "Synchronized new user");
                Ok(SyncOutcome::Created)
            }
            IdentityEvent::Updated { subject, fields } => {
                if self.users.update_fields(&subject, &fields).await? {
                    tracing::info!(subject = %subject, "Synchronized user update");
                    Ok(SyncOutcome::Updated)
                } else {
                    tracing::warn!(subject = %subject, "Update for unknown subject ignored");
                    Ok(SyncOutcome::Ignored)
                }
            }
            IdentityEvent::Deleted { subject } => {
                if self.users.delete(&subject).await? {
                    tracing::info!(subject = %subject, "Deleted synchronized user");
                    Ok(SyncOutcome::Deleted)
                } else {
                    tracing::warn!(subject = %subject, "Delete for unknown subject ignored");
                    Ok(SyncOutcome::Ignored)
                }
            }
            IdentityEvent::Unrecognized { kind } => {
                tracing::debug!(kind = %kind, "Ignoring unrecognized event kind");
                Ok(SyncOutcome::Ignored)
            }
        }
    }
}

fn map_webhook_error(err: WebhookError) -> DomainError {
    DomainError::invalid_signature(err.to_string())
}
