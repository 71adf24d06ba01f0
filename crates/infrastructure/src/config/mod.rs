//! Application configuration
//!
//! Tunables are loaded once at start-up from built-in defaults, an optional
//! `config.toml` in the working directory, and `MAUSAM_`-prefixed
//! environment variables, in that order. Nested keys use a double
//! underscore, e.g. `MAUSAM_SERVER__PORT=9000` or
//! `MAUSAM_WEATHER__TIMEOUT_SECS=10`.

mod credentials;
mod server;

pub use credentials::{
    Credentials, GEMINI_API_KEY_VAR, OPENWEATHER_API_KEY_VAR, missing_key_message,
};
pub use server::ServerConfig;

use ai_core::InferenceConfig;
use integration_weather::WeatherConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::TelemetryConfig;

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "MAUSAM";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Text generation settings
    #[serde(default)]
    pub inference: InferenceConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment and optional file
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(config::File::with_name("config").required(false))
    }

    /// Load with `file` as the file layer, still applying environment overrides
    pub fn load_from<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let builder = config::Config::builder()
            // Start with defaults
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8501)?
            // Load from file if exists
            .add_source(file)
            // Override with environment variables (e.g., MAUSAM_SERVER__PORT)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        config.try_deserialize()
    }
}
