// Configuration management module
// This file handles loading and parsing of configuration settings
// for both services from environment variables
//
// Numan Thabit 2025 Nov

use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use url::Url;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human readable lines
    Text,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderServiceConfig {
    /// Address the HTTP server binds, e.g. 0.0.0.0:8000
    pub listen_addr: SocketAddr,
    /// Base URL of the payment service, e.g. http://payment-service:8001
    pub payment_url: Url,
    pub log_format: LogFormat,
}

impl OrderServiceConfig {
    pub const ENV_PREFIX: &'static str = "ORDER";

    /// Load from `ORDER_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_env(service_environment(Self::ENV_PREFIX))
    }

    fn from_env(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .set_default("listen_addr", "0.0.0.0:8000")?
            .set_default("payment_url", "http://payment-service:8001")?
            .set_default("log_format", "json")?
            .add_source(env)
            .build()?;
        cfg.try_deserialize()
            .context("deserialize order-service configuration")
    }

    /// Full URL of the payment endpoint, `pay` appended to the base path.
    pub fn pay_endpoint(&self) -> Result<Url> {
        let mut base = self.payment_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join("pay")
            .with_context(|| format!("invalid payment base url: {}", self.payment_url))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentServiceConfig {
    /// Address the HTTP server binds, e.g. 0.0.0.0:8001
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl PaymentServiceConfig {
    pub const ENV_PREFIX: &'static str = "PAYMENT";

    /// Load from `PAYMENT_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_env(service_environment(Self::ENV_PREFIX))
    }

    fn from_env(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .set_default("listen_addr", "0.0.0.0:8001")?
            .set_default("log_format", "json")?
            .add_source(env)
            .build()?;
        cfg.try_deserialize()
            .context("deserialize payment-service configuration")
    }
}

// PREFIX_LISTEN_ADDR -> listen_addr; "__" is kept for nesting
fn service_environment(prefix: &str) -> config::Environment {
    config::Environment::with_prefix(prefix)
        .prefix_separator("_")
        .separator("__")
}
