//! Weather adapter - Implements WeatherPort using integration_weather

use std::time::Instant;

use application::error::ApplicationError;
use application::ports::{CityForecast, WeatherPort};
use async_trait::async_trait;
use domain::{CityName, Humidity, RainProbability, WeatherSample, WindSpeed};
use integration_weather::{
    ForecastSlot, OpenWeatherMapClient, WeatherClient, WeatherConfig, WeatherError,
};
use secrecy::SecretString;
use tracing::{debug, instrument};

/// Adapter for weather services using the OpenWeatherMap API
#[derive(Debug)]
pub struct WeatherAdapter {
    client: OpenWeatherMapClient,
}

impl WeatherAdapter {
    /// Create with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(config: WeatherConfig, api_key: SecretString) -> Result<Self, ApplicationError> {
        let client = OpenWeatherMapClient::new(config, api_key)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map integration weather error to application error
    fn map_error(err: WeatherError) -> ApplicationError {
        match err {
            WeatherError::RateLimitExceeded => ApplicationError::RateLimited,
            WeatherError::Unauthorized(msg) => {
                ApplicationError::ProviderUnavailable(format!("API key rejected: {msg}"))
            },
            WeatherError::CityNotFound(city) => {
                ApplicationError::ProviderUnavailable(format!("city not found: {city}"))
            },
            WeatherError::ConnectionFailed(e)
            | WeatherError::RequestFailed(e)
            | WeatherError::ParseError(e)
            | WeatherError::ServiceUnavailable(e) => ApplicationError::ProviderUnavailable(e),
        }
    }

    /// Convert a provider slot into a domain sample
    fn map_slot(slot: ForecastSlot) -> WeatherSample {
        WeatherSample {
            timestamp: slot.time,
            temperature: slot.temperature,
            humidity: Humidity::clamped(slot.humidity),
            rain_probability: RainProbability::clamped(slot.precipitation_probability),
            description: slot.description,
            wind_speed: WindSpeed::from(slot.wind_speed),
            pressure: slot.pressure,
        }
    }
}

#[async_trait]
impl WeatherPort for WeatherAdapter {
    #[instrument(skip(self), fields(city = %city))]
    async fn get_forecast(&self, city: &CityName) -> Result<CityForecast, ApplicationError> {
        let start = Instant::now();

        let forecast = self
            .client
            .get_forecast(city.as_str())
            .await
            .map_err(Self::map_error)?;

        let samples: Vec<WeatherSample> = forecast.slots.into_iter().map(Self::map_slot).collect();

        debug!(
            provider_city = %forecast.city,
            samples = samples.len(),
            latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Forecast fetched"
        );

        Ok(CityForecast {
            city: forecast.city,
            samples,
        })
    }

    async fn is_healthy(&self) -> bool {
        self.client.is_healthy().await
    }
}
