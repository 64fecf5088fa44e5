// Logging setup
// This file installs the process-wide tracing subscriber used by both services
//
// Numan Thabit 2025 Nov

use crate::config::LogFormat;
use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

pub fn init_tracing(format: LogFormat) -> Result<()> {
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.to_string());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(env_filter))
        .with_target(false);
    match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    }
    .map_err(|err| anyhow!("tracing subscriber init: {err}"))
}
