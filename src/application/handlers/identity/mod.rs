//! Identity handlers: webhook-driven user synchronization.

mod sync_user;

pub use sync_user::{SyncOutcome, SyncUserCommand, SyncUserHandler};
