//! API error handling.
//!
//! Domain errors map to HTTP responses here, in one place. Settlement soft
//! failures (an already-processed payment, an unpaid order) are reported as
//! `success: false` with a 200 status; clients poll the verify endpoint and
//! a replay is an expected answer, not a protocol error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Uniform response envelope for failures and simple acknowledgements.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

impl StatusResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.0.code.is_soft_failure() {
            return (
                StatusCode::OK,
                Json(StatusResponse::failure(self.0.message)),
            )
                .into_response();
        }

        let status = match self.0.code {
            ErrorCode::ValidationFailed | ErrorCode::InvalidPlan => StatusCode::BAD_REQUEST,
            ErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            ErrorCode::Unauthorized | ErrorCode::InvalidSignature => StatusCode::UNAUTHORIZED,
            ErrorCode::GatewayError => StatusCode::BAD_GATEWAY,
            // Soft-failure codes were handled above
            ErrorCode::TransactionNotFound
            | ErrorCode::AlreadySettled
            | ErrorCode::OrderNotPaid
            | ErrorCode::DatabaseError
            | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(code = %self.0.code, "Request failed: {}", self.0.message);
        }

        (status, Json(StatusResponse::failure(self.0.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn soft_failures_respond_200_with_success_false() {
        let err = ApiError(DomainError::new(
            ErrorCode::AlreadySettled,
            "Payment already processed",
        ));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn signature_failures_are_unauthorized() {
        let err = ApiError(DomainError::invalid_signature("bad signature"));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn unknown_plan_is_bad_request() {
        let err = ApiError(DomainError::new(ErrorCode::InvalidPlan, "Unknown plan"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
