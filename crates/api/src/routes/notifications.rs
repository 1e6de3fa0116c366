//! Standalone notification endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use domain::NotificationPayload;
use fulfillment::{BookingStore, DeliveryReceipt, NotificationDispatcher, PaymentGateway};

use crate::error::ApiError;
use crate::routes::bookings::AppState;

/// POST /notifications/email — validate and send a confirmation
/// message directly. Unlike pipeline notifications, a delivery
/// failure here is returned to the caller.
#[tracing::instrument(skip(state, payload))]
pub async fn send_email<P, S, N>(
    State(state): State<Arc<AppState<P, S, N>>>,
    Json(payload): Json<NotificationPayload>,
) -> Result<Json<DeliveryReceipt>, ApiError>
where
    P: PaymentGateway + 'static,
    S: BookingStore + 'static,
    N: NotificationDispatcher + 'static,
{
    let receipt = state.orchestrator.send_confirmation(&payload).await?;
    Ok(Json(receipt))
}
