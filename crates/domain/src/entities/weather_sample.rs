//! A single provider forecast slot

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Humidity, RainProbability, WindSpeed};

/// One provider-reported forecast for a fixed 3-hour slot
///
/// `timestamp` is the slot start exactly as the provider writes it. Samples
/// for a city arrive in non-decreasing timestamp order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    /// Slot start
    pub timestamp: NaiveDateTime,
    /// Temperature in °C
    pub temperature: f64,
    /// Relative humidity
    pub humidity: Humidity,
    /// Probability of precipitation
    pub rain_probability: RainProbability,
    /// Short condition label, e.g. "clear sky"
    pub description: String,
    /// Wind speed, or unavailable when the provider omits it
    pub wind_speed: WindSpeed,
    /// Sea-level pressure in hPa
    pub pressure: u32,
}

impl WeatherSample {
    /// Calendar date of the slot
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
