//! Next-day forecast summary

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Humidity, WindSpeed};

/// A city's forecast for one calendar date, reduced from its 3-hour samples
///
/// Temperatures and rain probability are whole-day aggregates. Humidity,
/// description, wind and pressure are copied from the single sample closest
/// to noon and are not aggregated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    /// Canonical city name as returned by the provider
    pub city: String,
    /// The date being summarized
    pub target_date: NaiveDate,
    /// Timestamp of the sample nearest noon on `target_date`
    pub representative_timestamp: NaiveDateTime,
    /// Highest temperature of the day in °C, one decimal
    pub temperature_max: f64,
    /// Lowest temperature of the day in °C, one decimal
    pub temperature_min: f64,
    /// Humidity of the representative sample
    pub humidity: Humidity,
    /// Condition label of the representative sample
    pub description: String,
    /// Wind of the representative sample
    pub wind_speed: WindSpeed,
    /// Pressure of the representative sample in hPa
    pub pressure: u32,
    /// Mean rain probability over the day as a percentage, one decimal
    pub rain_probability_avg_percent: f64,
}

impl DailySummary {
    /// The representative timestamp in the provider's `YYYY-MM-DD HH:MM:SS` form
    #[must_use]
    pub fn forecast_time(&self) -> String {
        self.representative_timestamp
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}
