//! Payment gateway port.
//!
//! Defines the contract for creating and fetching orders at the external
//! payment provider. The gateway only knows about money amounts and opaque
//! receipts; credit semantics stay on this side of the boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Metadata attached to an order for reconciliation and support tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderNotes {
    pub plan: String,
    pub credits: i64,
    pub subject_id: String,
}

/// Request to open an order at the gateway.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    /// Amount in the currency's minor units.
    pub amount: i64,
    /// ISO 4217 currency code.
    pub currency: String,
    /// Caller-supplied reference, echoed back on fetch. Carries the local
    /// transaction id.
    pub receipt: String,
    pub notes: OrderNotes,
}

/// Lifecycle of a gateway order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    Attempted,
    Paid,
    /// A status this service does not model. Treated as not paid.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    pub fn is_paid(&self) -> bool {
        matches!(self, OrderStatus::Paid)
    }
}

/// An order as the gateway reports it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
    pub status: OrderStatus,
}

/// Gateway port.
///
/// Implementations hold immutable credentials injected at construction;
/// nothing about the client mutates per request.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Open an order at the gateway.
    async fn create_order(&self, request: &CreateOrderRequest)
        -> Result<GatewayOrder, DomainError>;

    /// Fetch an order by the gateway's order id.
    ///
    /// # Errors
    ///
    /// - `TransactionNotFound` if the gateway has no such order
    /// - `GatewayError` on transport or provider failures
    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, DomainError>;
}
