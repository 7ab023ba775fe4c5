//! Authentication adapters implementing the `TokenVerifier` port.

mod clerk;
mod mock;

pub use clerk::{ClerkConfig, ClerkTokenVerifier};
pub use mock::MockTokenVerifier;
