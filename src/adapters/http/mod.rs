//! HTTP adapters - Axum routes, handlers, and middleware.

pub mod billing;
pub mod identity;
pub mod middleware;

mod error;

pub use error::{ApiError, StatusResponse};
