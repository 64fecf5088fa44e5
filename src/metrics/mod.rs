// Metrics and observability module
// This file owns the per-service Prometheus registries: request counters
// and latency histograms, plus the text exposition of their contents
//
// Numan Thabit 2025 Nov

pub mod middleware;

pub use middleware::{export_metrics, instrument, track_requests, UNMATCHED_PATH_LABEL};

use prometheus::{
    Encoder, Histogram, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;
use std::time::Duration;

/// Latency buckets in seconds, shared by both services.
pub const LATENCY_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.075, 0.1, 0.25, 0.5, 0.75, 1.0, 2.5, 5.0, 7.5, 10.0,
];

/// Metrics handle shared by the middleware and the exporter of one service.
pub type SharedMetrics = Arc<dyn ServiceMetrics>;

/// A service's request metrics.
///
/// Each service decides which labels it keeps; the middleware hands over
/// everything it knows about a completed request.
pub trait ServiceMetrics: Send + Sync + 'static {
    /// Record one completed request: one counter increment and one latency observation.
    fn observe(&self, method: &str, path: &str, status: u16, elapsed: Duration);

    fn registry(&self) -> &Registry;

    /// Encode the registry in the Prometheus text format.
    fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let families = self.registry().gather();
        let mut buffer = Vec::new();
        encoder.encode(&families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

/// order-service metrics, labeled by method, path and status.
#[derive(Clone)]
pub struct HttpMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
}

impl HttpMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total HTTP Requests"),
            &["method", "path", "status"],
        )?;
        let latency = HistogramVec::new(
            HistogramOpts::new("http_request_latency_seconds", "Request latency")
                .buckets(LATENCY_BUCKETS.to_vec()),
            &["method", "path"],
        )?;
        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;
        Ok(Self {
            registry,
            requests,
            latency,
        })
    }

    pub fn request_count(&self, method: &str, path: &str, status: u16) -> u64 {
        self.requests
            .with_label_values(&[method, path, &status.to_string()])
            .get()
    }

    pub fn latency_samples(&self, method: &str, path: &str) -> u64 {
        self.latency
            .with_label_values(&[method, path])
            .get_sample_count()
    }
}

impl ServiceMetrics for HttpMetrics {
    fn observe(&self, method: &str, path: &str, status: u16, elapsed: Duration) {
        self.latency
            .with_label_values(&[method, path])
            .observe(elapsed.as_secs_f64());
        self.requests
            .with_label_values(&[method, path, &status.to_string()])
            .inc();
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// payment-service metrics. Counters carry only the status; latency is unlabeled.
#[derive(Clone)]
pub struct PaymentMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: Histogram,
}

impl PaymentMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();
        let requests = IntCounterVec::new(
            Opts::new("payment_requests_total", "Total Payment Requests"),
            &["status"],
        )?;
        let latency = Histogram::with_opts(
            HistogramOpts::new("payment_request_latency_seconds", "Payment latency")
                .buckets(LATENCY_BUCKETS.to_vec()),
        )?;
        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;
        Ok(Self {
            registry,
            requests,
            latency,
        })
    }

    pub fn request_count(&self, status: u16) -> u64 {
        self.requests.with_label_values(&[&status.to_string()]).get()
    }

    pub fn latency_samples(&self) -> u64 {
        self.latency.get_sample_count()
    }
}

impl ServiceMetrics for PaymentMetrics {
    fn observe(&self, _method: &str, _path: &str, status: u16, elapsed: Duration) {
        self.latency.observe(elapsed.as_secs_f64());
        self.requests.with_label_values(&[&status.to_string()]).inc();
    }

    fn registry(&self) -> &Registry {
        &self.registry
    }
}
