//! Identity domain: local user records and provider lifecycle events.

mod event;
mod user;
mod webhook_verifier;

pub use event::{IdentityEvent, UserFields};
pub use user::User;
pub use webhook_verifier::{IdentityWebhookVerifier, WebhookError, WebhookHeaders};
