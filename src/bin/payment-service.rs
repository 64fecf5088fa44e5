use anyhow::{Context, Result};
use fault_mesh::config::PaymentServiceConfig;
use fault_mesh::metrics::PaymentMetrics;
use fault_mesh::server;
use fault_mesh::services::{payment, PaymentSimulator};
use fault_mesh::telemetry::init_tracing;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let config = PaymentServiceConfig::load().context("load payment-service configuration")?;
    init_tracing(config.log_format).context("initialize tracing subscriber")?;

    if let Err(err) = run(config).await {
        tracing::error!(error = ?err, "fatal payment-service error");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(config: PaymentServiceConfig) -> Result<()> {
    let metrics = Arc::new(PaymentMetrics::new().context("register payment-service metrics")?);
    let app = payment::router(PaymentSimulator::default(), metrics);
    server::serve("payment-service", config.listen_addr, app).await
}
