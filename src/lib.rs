//! Creditline - Credit-based billing backend.
//!
//! This crate keeps a local mirror of identity-provider users and sells them
//! prepaid credit bundles through an external payment gateway, settling each
//! purchase exactly once.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
