// Order handler implementation
// This file orchestrates order creation: optional local fault injection,
// then a bounded payment call whose result is mapped to the response status
//
// Numan Thabit 2025 Nov

use crate::errors::PaymentCallError;
use crate::metrics::{instrument, SharedMetrics};
use crate::services::health;
use crate::transport::PaymentGateway;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Delay injected by `simulate=slow` before the payment call.
pub const SLOW_ORDER_DELAY: Duration = Duration::from_secs(2);

/// Per-request fault simulation requested through `?simulate=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FaultDirective {
    #[default]
    None,
    Slow,
    Error,
}

impl FaultDirective {
    /// Case-sensitive; anything other than `slow` or `error` means no fault.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("slow") => Self::Slow,
            Some("error") => Self::Error,
            _ => Self::None,
        }
    }
}

/// Terminal state of one order request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOutcome {
    Created,
    /// Injected local failure, payment service never contacted
    InternalFailure,
    /// Payment service answered with something other than 200
    PaymentFailed,
    /// Payment service timed out or could not be reached
    PaymentUnavailable,
}

impl OrderOutcome {
    pub fn status(self) -> StatusCode {
        match self {
            Self::Created => StatusCode::OK,
            Self::InternalFailure => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PaymentFailed => StatusCode::BAD_GATEWAY,
            Self::PaymentUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for OrderOutcome {
    fn into_response(self) -> Response {
        match self {
            Self::Created => (self.status(), Json(json!({ "status": "order created" }))).into_response(),
            other => other.status().into_response(),
        }
    }
}

#[derive(Clone)]
pub struct OrderService {
    payments: Arc<dyn PaymentGateway>,
    slow_delay: Duration,
}

impl OrderService {
    pub fn new(payments: Arc<dyn PaymentGateway>) -> Self {
        Self {
            payments,
            slow_delay: SLOW_ORDER_DELAY,
        }
    }

    pub fn with_slow_delay(mut self, delay: Duration) -> Self {
        self.slow_delay = delay;
        self
    }

    /// Run one order through fault injection and the payment call. No retries.
    pub async fn place_order(&self, directive: FaultDirective) -> OrderOutcome {
        match directive {
            FaultDirective::Error => {
                error!("order internal failure");
                return OrderOutcome::InternalFailure;
            }
            FaultDirective::Slow => tokio::time::sleep(self.slow_delay).await,
            FaultDirective::None => {}
        }

        match self.payments.charge().await {
            Ok(()) => OrderOutcome::Created,
            Err(PaymentCallError::Rejected { status }) => {
                error!(status, "payment failed");
                OrderOutcome::PaymentFailed
            }
            Err(PaymentCallError::Unavailable(detail)) => {
                error!(error = %detail, "payment service unreachable");
                OrderOutcome::PaymentUnavailable
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct OrderParams {
    pub simulate: Option<String>,
}

/// `POST /order?simulate=none|slow|error`
pub async fn create_order(
    State(service): State<OrderService>,
    params: Option<Query<OrderParams>>,
) -> OrderOutcome {
    // an unparseable query string counts as no directive
    let simulate = params.and_then(|Query(p)| p.simulate);
    info!(simulate = simulate.as_deref().unwrap_or("none"), "creating order");

    service
        .place_order(FaultDirective::from_param(simulate.as_deref()))
        .await
}

/// order-service HTTP surface: /health, /metrics and /order, all instrumented.
pub fn router(service: OrderService, metrics: SharedMetrics) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/order", post(create_order))
        .with_state(service);
    instrument(routes, metrics).layer(TraceLayer::new_for_http().on_failure(()))
}
