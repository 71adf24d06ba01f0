//! OpenWeatherMap forecast client
//!
//! HTTP client for the 5 day / 3 hour forecast endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::models::{ApiErrorBody, ApiResponse, Forecast};

/// Weather client errors
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Connection to the weather service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the weather service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// The API key was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The provider does not know the city
    #[error("City not found: {0}")]
    CityNotFound(String),

    /// Failed to parse response from weather service
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Weather service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API base URL (default: <https://api.openweathermap.org/data/2.5>)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Country code appended to every city query (default: IN)
    #[serde(default = "default_country_code")]
    pub country_code: String,

    /// Unit system requested from the provider (default: metric)
    #[serde(default = "default_units")]
    pub units: String,

    /// How long a health result is reused before probing again (default: 300)
    #[serde(default = "default_health_ttl")]
    pub health_ttl_secs: u64,
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout() -> u64 {
    30
}

fn default_country_code() -> String {
    "IN".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

const fn default_health_ttl() -> u64 {
    300
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            country_code: default_country_code(),
            units: default_units(),
            health_ttl_secs: default_health_ttl(),
        }
    }
}

/// Weather client trait for fetching forecasts
#[async_trait]
pub trait WeatherClient: Send + Sync {
    /// Get the 3-hourly forecast for a city in the configured country
    async fn get_forecast(&self, city: &str) -> Result<Forecast, WeatherError>;

    /// Check if the weather service is healthy
    async fn is_healthy(&self) -> bool;
}

/// City used by the health probe
const HEALTH_CITY: &str = "Delhi";

/// OpenWeatherMap HTTP client implementation
pub struct OpenWeatherMapClient {
    client: Client,
    config: WeatherConfig,
    api_key: SecretString,
    last_health: Mutex<Option<(Instant, bool)>>,
}

impl std::fmt::Debug for OpenWeatherMapClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenWeatherMapClient")
            .field("config", &self.config)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl OpenWeatherMapClient {
    /// Create a new client with the given configuration and API key
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: WeatherConfig, api_key: SecretString) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| WeatherError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config,
            api_key,
            last_health: Mutex::new(None),
        })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.config.base_url.trim_end_matches('/'))
    }

    /// The `q` parameter: `"{city},{country}"`
    fn location_query(&self, city: &str) -> String {
        format!("{},{}", city.trim(), self.config.country_code)
    }

    /// One-slot forecast request; any success status counts as healthy
    async fn probe(&self) -> bool {
        let response = self
            .client
            .get(self.forecast_url())
            .query(&[
                ("q", self.location_query(HEALTH_CITY).as_str()),
                ("appid", self.api_key.expose_secret()),
                ("cnt", "1"),
            ])
            .send()
            .await;

        match response {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!(error = %e.without_url(), "Weather health probe failed");
                false
            },
        }
    }

    /// Map a non-success status to an error, logging the provider's message
    async fn status_error(response: Response, city: &str) -> WeatherError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or(body);

        warn!(status = %status, city = %city, message = %message, "Weather API error");

        match status {
            StatusCode::UNAUTHORIZED => WeatherError::Unauthorized(message),
            StatusCode::NOT_FOUND => WeatherError::CityNotFound(city.to_string()),
            StatusCode::TOO_MANY_REQUESTS => WeatherError::RateLimitExceeded,
            s if s.is_server_error() => WeatherError::ServiceUnavailable(format!("HTTP {s}")),
            s => WeatherError::RequestFailed(format!("HTTP {s}: {message}")),
        }
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherMapClient {
    #[instrument(skip(self), fields(country = %self.config.country_code))]
    async fn get_forecast(&self, city: &str) -> Result<Forecast, WeatherError> {
        debug!(city = %city, "Fetching weather forecast");

        let response = self
            .client
            .get(self.forecast_url())
            .query(&[
                ("q", self.location_query(city).as_str()),
                ("appid", self.api_key.expose_secret()),
                ("units", self.config.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() || e.is_timeout() {
                    WeatherError::ConnectionFailed(e.without_url().to_string())
                } else {
                    WeatherError::RequestFailed(e.without_url().to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(Self::status_error(response, city).await);
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::ParseError(e.without_url().to_string()))?;

        let forecast = api_response
            .into_forecast()
            .map_err(WeatherError::ParseError)?;

        debug!(
            city = %forecast.city,
            slots = forecast.slots.len(),
            "Received weather forecast"
        );

        Ok(forecast)
    }

    /// Probes at most once per `health_ttl_secs`, so readiness polling does
    /// not spend forecast quota
    async fn is_healthy(&self) -> bool {
        let ttl = Duration::from_secs(self.config.health_ttl_secs);
        let mut last = self.last_health.lock().await;

        if let Some((checked_at, healthy)) = *last {
            if checked_at.elapsed() < ttl {
                return healthy;
            }
        }

        let healthy = self.probe().await;
        *last = Some((Instant::now(), healthy));
        healthy
    }
}
