// Request instrumentation and metrics exposition
// This file wraps every inbound request with latency/outcome recording
// and serves the registry on GET /metrics
//
// Numan Thabit 2025 Nov

use super::SharedMetrics;
use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::time::Instant;
use tracing::error;

/// Path label for requests that matched no route.
pub const UNMATCHED_PATH_LABEL: &str = "__unmatched__";

/// Record latency and status of every request passing through.
///
/// The handler's response is returned untouched; error statuses are
/// recorded exactly like successes.
pub async fn track_requests(
    State(metrics): State<SharedMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let start = Instant::now();
    let method = request.method().as_str().to_owned();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_owned())
        .unwrap_or_else(|| UNMATCHED_PATH_LABEL.to_owned());

    let response = next.run(request).await;

    metrics.observe(&method, &path, response.status().as_u16(), start.elapsed());
    response
}

/// Prometheus text exposition of the service registry.
pub async fn export_metrics(State(metrics): State<SharedMetrics>) -> Response {
    match metrics.render() {
        Ok(body) => ([(header::CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(err) => {
            error!(error = %err, "metrics encoding failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Add `GET /metrics` to `routes` and wrap the whole router, fallback
/// included, with [`track_requests`].
pub fn instrument(routes: Router, metrics: SharedMetrics) -> Router {
    let exporter = Router::new()
        .route("/metrics", get(export_metrics))
        .with_state(metrics.clone());
    routes
        .merge(exporter)
        .layer(middleware::from_fn_with_state(metrics, track_requests))
}
