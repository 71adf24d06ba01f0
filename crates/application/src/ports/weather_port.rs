//! Weather service port
//!
//! Defines the interface for weather data retrieval.

use async_trait::async_trait;
use domain::{CityName, WeatherSample};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A city's 3-hour samples as reported by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityForecast {
    /// Canonical city name from the provider, which may differ from the query
    pub city: String,
    /// Samples in non-decreasing timestamp order
    pub samples: Vec<WeatherSample>,
}

/// Port for weather data retrieval
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherPort: Send + Sync {
    /// Fetch the multi-day forecast for a city
    async fn get_forecast(&self, city: &CityName) -> Result<CityForecast, ApplicationError>;

    /// Check if the weather service is reachable
    async fn is_healthy(&self) -> bool;
}
