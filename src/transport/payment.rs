// Payment service HTTP client
// This file implements the bounded order -> payment call and classifies
// its result as success, rejection or unavailability
//
// Numan Thabit 2025 Nov

use crate::errors::PaymentCallError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use url::Url;

/// Hard bound on a payment call, connect through response headers.
pub const PAYMENT_TIMEOUT: Duration = Duration::from_secs(3);

/// Something that can charge a payment for an order.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// `Ok` only when the payment service answered 200.
    async fn charge(&self) -> Result<(), PaymentCallError>;
}

#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    http: Client,
    url: Url,
}

impl HttpPaymentClient {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client for payment service")?;
        Ok(Self { http, url })
    }

    pub fn endpoint(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentClient {
    async fn charge(&self) -> Result<(), PaymentCallError> {
        let resp = self
            .http
            .post(self.url.clone())
            .send()
            .await
            .map_err(|e| PaymentCallError::Unavailable(e.to_string()))?;
        match resp.status() {
            StatusCode::OK => Ok(()),
            status => Err(PaymentCallError::Rejected {
                status: status.as_u16(),
            }),
        }
    }
}
