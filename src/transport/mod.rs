// Outbound transport layer
//
// Numan Thabit 2025 Nov

pub mod payment;

pub use payment::{HttpPaymentClient, PaymentGateway, PAYMENT_TIMEOUT};
