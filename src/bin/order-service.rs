use anyhow::{Context, Result};
use fault_mesh::config::OrderServiceConfig;
use fault_mesh::metrics::HttpMetrics;
use fault_mesh::server;
use fault_mesh::services::{order, OrderService};
use fault_mesh::telemetry::init_tracing;
use fault_mesh::transport::{HttpPaymentClient, PAYMENT_TIMEOUT};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = OrderServiceConfig::load().context("load order-service configuration")?;
    init_tracing(config.log_format).context("initialize tracing subscriber")?;

    if let Err(err) = run(config).await {
        tracing::error!(error = ?err, "fatal order-service error");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(config: OrderServiceConfig) -> Result<()> {
    let metrics = Arc::new(HttpMetrics::new().context("register order-service metrics")?);

    let pay_endpoint = config.pay_endpoint()?;
    let payments = HttpPaymentClient::new(pay_endpoint, PAYMENT_TIMEOUT)?;
    info!(
        payment_endpoint = %payments.endpoint(),
        timeout_ms = PAYMENT_TIMEOUT.as_millis() as u64,
        "payment client initialized"
    );

    let app = order::router(OrderService::new(Arc::new(payments)), metrics);
    server::serve("order-service", config.listen_addr, app).await
}
