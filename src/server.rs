// HTTP server bootstrap
// Binds a listener and serves a router until Ctrl-C
//
// Numan Thabit 2025 Nov

use anyhow::{Context, Result};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub async fn serve(service: &'static str, addr: SocketAddr, app: Router) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {service} on {addr}"))?;
    info!(service, address = %addr, "HTTP server starting");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .with_context(|| format!("{service} server error"))?;

    info!(service, "HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "ctrl_c listener error; serving until killed");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining in-flight requests");
}
