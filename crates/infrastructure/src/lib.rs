//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and carries the
//! process-level plumbing shared by both binaries: configuration,
//! credentials, logging and page templates.

pub mod adapters;
pub mod config;
pub mod telemetry;
pub mod templates;

pub use adapters::*;
pub use config::{AppConfig, Credentials, ServerConfig};
pub use telemetry::{TelemetryConfig, TelemetryError, init_telemetry};
pub use templates::{ForecastPage, ForecastView, TemplateEngine, TemplateError};
