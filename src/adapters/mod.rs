//! Adapters - Implementations of ports against real infrastructure.
//!
//! - `auth` - Identity-provider token verification (JWKS)
//! - `http` - Axum routes, handlers, and middleware
//! - `postgres` - sqlx-backed repositories
//! - `razorpay` - Payment gateway client

pub mod auth;
pub mod http;
pub mod postgres;
pub mod razorpay;
