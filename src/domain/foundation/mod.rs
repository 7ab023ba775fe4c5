//! Shared domain building blocks: identifiers, errors, caller identity.

mod auth;
mod errors;
mod ids;

pub use auth::{AuthError, AuthenticatedCaller};
pub use errors::{DomainError, ErrorCode};
pub use ids::{SubjectId, TransactionId};
