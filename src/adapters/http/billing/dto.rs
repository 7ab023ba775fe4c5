//! HTTP DTOs for billing endpoints.
//!
//! These types define the JSON request/response structure of the billing API
//! and are the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::ports::GatewayOrder;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to purchase a credit bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    /// Plan selector, e.g. `"Advanced"`.
    #[serde(rename = "planId")]
    pub plan_id: String,
}

/// Checkout callback triple, named as the gateway's checkout script posts it.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response for the balance query.
#[derive(Debug, Clone, Serialize)]
pub struct CreditsResponse {
    pub success: bool,
    pub credits: i64,
}

/// Response for a created order, carrying what the checkout script needs.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: OrderResponse,
}

/// Gateway order view.
#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub receipt: Option<String>,
}

impl From<GatewayOrder> for OrderResponse {
    fn from(order: GatewayOrder) -> Self {
        Self {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
            receipt: order.receipt,
        }
    }
}

/// Response for a settled payment.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub credits: i64,
}
