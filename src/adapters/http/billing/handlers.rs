//! HTTP handlers for billing endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    CreateOrderCommand, CreateOrderHandler, GetCreditsHandler, GetCreditsQuery,
    SettlePaymentCommand, SettlePaymentHandler, VerifyPaymentHandler,
};
use crate::domain::billing::CheckoutSignatureVerifier;
use crate::ports::{PaymentGateway, TransactionRepository, UserRepository};

use super::super::error::ApiError;
use super::super::middleware::RequireAuth;
use super::dto::{
    CreateOrderRequest, CreateOrderResponse, CreditsResponse, OrderResponse,
    VerifyPaymentRequest, VerifyPaymentResponse,
};

/// Shared billing state, cloned per request.
///
/// The signature verifier and currency come from configuration at startup
/// and stay immutable for the process lifetime.
#[derive(Clone)]
pub struct BillingAppState {
    pub users: Arc<dyn UserRepository>,
    pub transactions: Arc<dyn TransactionRepository>,
    pub gateway: Arc<dyn PaymentGateway>,
    pub checkout_verifier: CheckoutSignatureVerifier,
    pub currency: String,
}

impl BillingAppState {
    /// Create handlers on demand from the shared state.
    pub fn get_credits_handler(&self) -> GetCreditsHandler {
        GetCreditsHandler::new(self.users.clone())
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(
            self.users.clone(),
            self.transactions.clone(),
            self.gateway.clone(),
            self.currency.clone(),
        )
    }

    pub fn settle_payment_handler(&self) -> SettlePaymentHandler {
        SettlePaymentHandler::new(
            VerifyPaymentHandler::new(self.checkout_verifier.clone()),
            self.gateway.clone(),
            self.transactions.clone(),
        )
    }
}

/// GET /api/credits - Current caller's credit balance
pub async fn get_credits(
    State(state): State<BillingAppState>,
    RequireAuth(caller): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.get_credits_handler();
    let result = handler
        .handle(GetCreditsQuery {
            subject: caller.subject,
        })
        .await?;

    Ok(Json(CreditsResponse {
        success: true,
        credits: result.credits,
    }))
}

/// POST /api/orders - Open a purchase order for a credit bundle
pub async fn create_order(
    State(state): State<BillingAppState>,
    RequireAuth(caller): RequireAuth,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.create_order_handler();
    let result = handler
        .handle(CreateOrderCommand {
            subject: caller.subject,
            plan: request.plan_id,
        })
        .await?;

    Ok(Json(CreateOrderResponse {
        success: true,
        order: OrderResponse::from(result.order),
    }))
}

/// POST /api/payments/verify - Verify a checkout callback and settle it
pub async fn verify_payment(
    State(state): State<BillingAppState>,
    RequireAuth(_caller): RequireAuth,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.settle_payment_handler();
    let result = handler
        .handle(SettlePaymentCommand {
            order_id: request.razorpay_order_id,
            payment_id: request.razorpay_payment_id,
            signature: request.razorpay_signature,
        })
        .await?;

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: "Credits added".to_string(),
        credits: result.credits,
    }))
}
