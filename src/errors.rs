// Error types and error handling module
// This file defines the typed failures of the order -> payment call
//
// Numan Thabit 2025 Nov

use thiserror::Error;

/// Failure of a single outbound payment call.
///
/// The two variants are kept apart because the order handler reports them
/// differently: a payment service that answered is a business failure, one
/// that could not be reached is an availability failure.
#[derive(Debug, Error)]
pub enum PaymentCallError {
    #[error("payment rejected with status {status}")]
    Rejected { status: u16 },
    #[error("payment service unreachable: {0}")]
    Unavailable(String),
}
