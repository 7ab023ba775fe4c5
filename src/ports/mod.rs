//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `UserRepository` - Persistence for synchronized user records
//! - `TransactionRepository` - Persistence and settlement of credit purchases
//! - `PaymentGateway` - Order creation and lookup at the payment provider
//! - `TokenVerifier` - Bearer token validation against the identity provider

mod payment_gateway;
mod token_verifier;
mod transaction_repository;
mod user_repository;

pub use payment_gateway::{CreateOrderRequest, GatewayOrder, OrderNotes, OrderStatus, PaymentGateway};
pub use token_verifier::TokenVerifier;
pub use transaction_repository::{SettlementOutcome, TransactionRepository};
pub use user_repository::UserRepository;
