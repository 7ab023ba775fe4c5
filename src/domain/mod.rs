//! Domain layer: entities, invariants, and signature schemes.

pub mod billing;
pub mod foundation;
pub mod identity;
