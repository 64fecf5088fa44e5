// HTTP services module
// Route handlers and router assembly for order-service and payment-service
//
// Numan Thabit 2025 Nov

pub mod health;
pub mod order;
pub mod payment;

pub use health::health;
pub use order::{FaultDirective, OrderOutcome, OrderService};
pub use payment::{OutcomeSource, PaymentOutcome, PaymentSimulator, UniformOutcomes};
