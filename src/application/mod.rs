//! Application layer - Use case orchestration.
//!
//! Handlers wire domain logic to ports. Each handler owns one operation,
//! takes a command or query struct, and returns a typed result.

pub mod handlers;
