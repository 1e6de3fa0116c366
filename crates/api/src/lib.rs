//! HTTP API server for the booking fulfillment workflow.
//!
//! Exposes the booking pipeline and the passthrough lookups over REST,
//! with structured logging (tracing) and Prometheus metrics. All
//! workflow logic lives in the `fulfillment` crate; handlers only
//! translate between HTTP and the orchestrator.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::Validator;
use fulfillment::{
    BookingOrchestrator, BookingStore, InMemoryBookingStore, InMemoryMailDispatcher,
    InMemoryPaymentGateway, NotificationDispatcher, PaymentGateway, Timeouts,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::bookings::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<P, S, N>(state: Arc<AppState<P, S, N>>, metrics_handle: PrometheusHandle) -> Router
where
    P: PaymentGateway + 'static,
    S: BookingStore + 'static,
    N: NotificationDispatcher + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/bookings", post(routes::bookings::place::<P, S, N>))
        .route("/bookings/{id}", get(routes::bookings::get_booking::<P, S, N>))
        .route("/tickets/{order_id}", get(routes::bookings::get_ticket::<P, S, N>))
        .route("/purchases", post(routes::purchases::create::<P, S, N>))
        .route("/purchases/{id}", get(routes::purchases::get::<P, S, N>))
        .route(
            "/notifications/email",
            post(routes::notifications::send_email::<P, S, N>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Application state wired to the in-memory adapters.
pub type DefaultAppState =
    AppState<InMemoryPaymentGateway, InMemoryBookingStore, InMemoryMailDispatcher>;

/// Creates the default application state with in-memory adapters.
///
/// Returns handles to the adapters alongside the state so callers
/// (and tests) can inspect or configure them.
pub fn create_default_state(
    timeouts: Timeouts,
) -> (
    Arc<DefaultAppState>,
    InMemoryPaymentGateway,
    InMemoryBookingStore,
    InMemoryMailDispatcher,
) {
    let gateway = InMemoryPaymentGateway::new();
    let store = InMemoryBookingStore::new();
    let dispatcher = InMemoryMailDispatcher::new();

    let orchestrator = BookingOrchestrator::with_timeouts(
        Validator::new(),
        gateway.clone(),
        store.clone(),
        dispatcher.clone(),
        timeouts,
    );

    let state = Arc::new(AppState { orchestrator });

    (state, gateway, store, dispatcher)
}
