//! Logging infrastructure
//!
//! Sets up the `tracing` subscriber shared by both binaries.

mod subscriber;

pub use subscriber::{TelemetryConfig, TelemetryError, init_telemetry};
