//! Razorpay implementation of the PaymentGateway port.
//!
//! Talks to the Orders API with basic auth (key id / key secret). Amounts are
//! in minor currency units throughout, matching what the port carries.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CreateOrderRequest, GatewayOrder, OrderNotes, OrderStatus, PaymentGateway};

/// Configuration for the Razorpay adapter.
///
/// Immutable once constructed; the gateway holds it for the lifetime of the
/// process and never mutates credentials per request.
#[derive(Clone)]
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: SecretString,
    api_base_url: String,
}

impl RazorpayConfig {
    pub fn new(key_id: impl Into<String>, key_secret: SecretString) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret,
            api_base_url: "https://api.razorpay.com".to_string(),
        }
    }

    /// Override the API base URL (for tests against a local stub).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

/// Order payload as the Orders API expects it.
#[derive(Debug, Serialize)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    notes: &'a OrderNotes,
}

/// Order as the Orders API returns it.
#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
    amount: i64,
    currency: String,
    receipt: Option<String>,
    status: OrderStatus,
}

impl From<OrderResponse> for GatewayOrder {
    fn from(response: OrderResponse) -> Self {
        GatewayOrder {
            id: response.id,
            amount: response.amount,
            currency: response.currency,
            receipt: response.receipt,
            status: response.status,
        }
    }
}

/// Error body shape returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    description: String,
}

/// Razorpay payment gateway client.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    http_client: reqwest::Client,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn error_from_response(response: reqwest::Response) -> DomainError {
        let status = response.status();
        let description = match response.json::<ErrorResponse>().await {
            Ok(body) if !body.error.description.is_empty() => body.error.description,
            _ => "no error description".to_string(),
        };
        DomainError::gateway(format!("Gateway returned {}: {}", status, description))
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        request: &CreateOrderRequest,
    ) -> Result<GatewayOrder, DomainError> {
        let url = format!("{}/v1/orders", self.config.api_base_url);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(&CreateOrderBody {
                amount: request.amount,
                currency: &request.currency,
                receipt: &request.receipt,
                notes: &request.notes,
            })
            .send()
            .await
            .map_err(|e| DomainError::gateway(format!("Order creation failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to parse order: {}", e)))?;

        Ok(order.into())
    }

    async fn fetch_order(&self, order_id: &str) -> Result<GatewayOrder, DomainError> {
        let url = format!("{}/v1/orders/{}", self.config.api_base_url, order_id);

        let response = self
            .http_client
            .get(&url)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| DomainError::gateway(format!("Order lookup failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(DomainError::new(
                ErrorCode::TransactionNotFound,
                format!("Gateway has no order {}", order_id),
            ));
        }

        if !response.status().is_success() {
            return Err(Self::error_from_response(response).await);
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| DomainError::gateway(format!("Failed to parse order: {}", e)))?;

        Ok(order.into())
    }
}
