//! Direct purchase endpoints, outside the booking pipeline.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use domain::{ChargeId, ChargeReceipt, CreditCard, Money, PaymentOrder, DEFAULT_CURRENCY};
use fulfillment::{BookingStore, NotificationDispatcher, PaymentGateway};
use serde::Deserialize;

use crate::error::ApiError;
use crate::routes::bookings::AppState;

#[derive(Deserialize)]
pub struct PurchaseRequest {
    pub payer_name: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub number: String,
    pub cvc: String,
    pub exp_month: u32,
    pub exp_year: u32,
    pub amount_cents: i64,
    pub description: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl PurchaseRequest {
    fn into_order(self) -> PaymentOrder {
        PaymentOrder {
            payer_name: self.payer_name,
            currency: self.currency,
            card: CreditCard {
                number: self.number,
                cvc: self.cvc,
                exp_month: self.exp_month,
                exp_year: self.exp_year,
            },
            amount: Money::from_cents(self.amount_cents),
            description: self.description,
        }
    }
}

/// POST /purchases — validate and charge a standalone payment order.
#[tracing::instrument(skip(state, req))]
pub async fn create<P, S, N>(
    State(state): State<Arc<AppState<P, S, N>>>,
    Json(req): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<ChargeReceipt>), ApiError>
where
    P: PaymentGateway + 'static,
    S: BookingStore + 'static,
    N: NotificationDispatcher + 'static,
{
    let receipt = state.orchestrator.purchase(req.into_order()).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// GET /purchases/:id — load a captured charge by its identifier.
#[tracing::instrument(skip(state))]
pub async fn get<P, S, N>(
    State(state): State<Arc<AppState<P, S, N>>>,
    Path(id): Path<String>,
) -> Result<Json<ChargeReceipt>, ApiError>
where
    P: PaymentGateway + 'static,
    S: BookingStore + 'static,
    N: NotificationDispatcher + 'static,
{
    let receipt = state
        .orchestrator
        .find_purchase(&ChargeId::new(id.clone()))
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Purchase {id} not found")))?;
    Ok(Json(receipt))
}
