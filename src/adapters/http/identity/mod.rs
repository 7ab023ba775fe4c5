//! Identity webhook endpoint.

pub mod handlers;
pub mod routes;

pub use handlers::IdentityAppState;
pub use routes::webhook_routes;
