//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fulfillment::{BookingError, StoreError};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Workflow error from the fulfillment pipeline.
    Workflow(BookingError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Workflow(err) => workflow_error_to_response(err),
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn workflow_error_to_response(err: BookingError) -> (StatusCode, String) {
    match &err {
        BookingError::Validation(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        BookingError::PaymentDeclined { .. } => (StatusCode::PAYMENT_REQUIRED, err.to_string()),
        BookingError::PaymentGateway(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
        // A seat conflict is user-facing even when it arrives after the
        // charge; the stranded charge is still logged for reconciliation.
        BookingError::ChargedNotRecorded {
            source: StoreError::SeatConflict { .. },
            ..
        } => {
            tracing::error!(error = %err, "seat conflict left a charge without a record");
            (StatusCode::CONFLICT, err.to_string())
        }
        BookingError::ChargedNotRecorded { .. } => {
            tracing::error!(error = %err, "booking left a charge without a record");
            (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
        BookingError::Store(_) => (StatusCode::SERVICE_UNAVAILABLE, err.to_string()),
        BookingError::Delivery(_) => (StatusCode::BAD_GATEWAY, err.to_string()),
    }
}

impl From<BookingError> for ApiError {
    fn from(err: BookingError) -> Self {
        ApiError::Workflow(err)
    }
}
