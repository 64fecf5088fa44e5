// Library root module for fault-mesh
// This file defines the module structure shared by the order-service and
// payment-service binaries
//
// Numan Thabit 2025 Nov

pub mod config;
pub mod errors;
pub mod metrics;
pub mod server;
pub mod services;
pub mod telemetry;
pub mod transport;
