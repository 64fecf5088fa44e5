// Payment handler implementation
// This file simulates variable payment processing: each request draws
// one of ok / slow / error and answers accordingly
//
// Numan Thabit 2025 Nov

use crate::metrics::{instrument, SharedMetrics};
use crate::services::health;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use rand::Rng;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

/// Processing delay of the slow outcome.
pub const SLOW_PAYMENT_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentOutcome {
    Ok,
    Slow,
    Error,
}

impl PaymentOutcome {
    pub const ALL: [PaymentOutcome; 3] = [Self::Ok, Self::Slow, Self::Error];
}

/// Decides how a payment request behaves.
pub trait OutcomeSource: Send + Sync + 'static {
    fn draw(&self) -> PaymentOutcome;
}

impl<F> OutcomeSource for F
where
    F: Fn() -> PaymentOutcome + Send + Sync + 'static,
{
    fn draw(&self) -> PaymentOutcome {
        self()
    }
}

/// Independent uniform draw per request.
#[derive(Debug, Default, Clone, Copy)]
pub struct UniformOutcomes;

impl OutcomeSource for UniformOutcomes {
    fn draw(&self) -> PaymentOutcome {
        let idx = rand::thread_rng().gen_range(0..PaymentOutcome::ALL.len());
        PaymentOutcome::ALL[idx]
    }
}

#[derive(Clone)]
pub struct PaymentSimulator {
    outcomes: Arc<dyn OutcomeSource>,
    slow_delay: Duration,
}

impl Default for PaymentSimulator {
    fn default() -> Self {
        Self::new(Arc::new(UniformOutcomes))
    }
}

impl PaymentSimulator {
    pub fn new(outcomes: Arc<dyn OutcomeSource>) -> Self {
        Self {
            outcomes,
            slow_delay: SLOW_PAYMENT_DELAY,
        }
    }

    pub fn with_slow_delay(mut self, delay: Duration) -> Self {
        self.slow_delay = delay;
        self
    }

    /// Draw an outcome and play it out, sleeping on the slow path.
    pub async fn process(&self) -> PaymentOutcome {
        let outcome = self.outcomes.draw();
        match outcome {
            PaymentOutcome::Slow => {
                debug!(delay_ms = self.slow_delay.as_millis() as u64, "simulating slow payment");
                tokio::time::sleep(self.slow_delay).await;
            }
            PaymentOutcome::Error => error!("payment processing error"),
            PaymentOutcome::Ok => {}
        }
        outcome
    }
}

/// `POST /pay`
pub async fn pay(State(simulator): State<PaymentSimulator>) -> Response {
    match simulator.process().await {
        PaymentOutcome::Ok | PaymentOutcome::Slow => {
            (StatusCode::OK, Json(json!({ "status": "paid" }))).into_response()
        }
        PaymentOutcome::Error => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// payment-service HTTP surface: /health, /metrics and /pay, all instrumented.
pub fn router(simulator: PaymentSimulator, metrics: SharedMetrics) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/pay", post(pay))
        .with_state(simulator);
    instrument(routes, metrics).layer(TraceLayer::new_for_http().on_failure(()))
}
