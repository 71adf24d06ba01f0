//! Weather data models
//!
//! Wire types for the OpenWeatherMap 5 day / 3 hour forecast and the
//! public types the client hands back.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout of the `dt_txt` field
pub(crate) const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A city's forecast as returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Forecast {
    /// Canonical city name reported by the provider
    pub city: String,
    /// ISO country code reported by the provider
    pub country: Option<String>,
    /// 3-hour slots in provider order
    pub slots: Vec<ForecastSlot>,
}

/// One 3-hour forecast slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSlot {
    /// Slot time, naive, as given by `dt_txt` (UTC)
    pub time: NaiveDateTime,
    /// Temperature in the requested units
    pub temperature: f64,
    /// Relative humidity, percent as reported
    pub humidity: i64,
    /// Sea-level pressure in hPa
    pub pressure: u32,
    /// Short description of the first weather condition
    pub description: String,
    /// Wind speed, `None` when the provider omits it
    pub wind_speed: Option<f64>,
    /// Probability of precipitation in [0, 1]; omission is 0
    pub precipitation_probability: f64,
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse {
    #[serde(default)]
    pub list: Vec<ApiSlot>,
    pub city: ApiCity,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCity {
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiSlot {
    pub dt_txt: String,
    pub main: ApiMain,
    #[serde(default)]
    pub weather: Vec<ApiCondition>,
    #[serde(default)]
    pub wind: Option<ApiWind>,
    #[serde(default)]
    pub pop: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMain {
    pub temp: f64,
    pub humidity: i64,
    pub pressure: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCondition {
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiWind {
    #[serde(default)]
    pub speed: Option<f64>,
}

/// Body sent alongside non-2xx statuses, e.g. `{"cod":"404","message":"city not found"}`
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
}

impl ApiSlot {
    /// Convert to the public slot type
    ///
    /// Returns a description of what is wrong when the slot is unusable.
    pub fn into_slot(self) -> Result<ForecastSlot, String> {
        let time = NaiveDateTime::parse_from_str(&self.dt_txt, DT_TXT_FORMAT)
            .map_err(|e| format!("invalid dt_txt {:?}: {e}", self.dt_txt))?;

        let description = self
            .weather
            .into_iter()
            .next()
            .map(|c| c.description)
            .ok_or_else(|| format!("slot {} has no weather entry", self.dt_txt))?;

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pressure = self.main.pressure.round().clamp(0.0, f64::from(u32::MAX)) as u32;

        Ok(ForecastSlot {
            time,
            temperature: self.main.temp,
            humidity: self.main.humidity,
            pressure,
            description,
            wind_speed: self.wind.and_then(|w| w.speed),
            precipitation_probability: self.pop.unwrap_or(0.0),
        })
    }
}

impl ApiResponse {
    pub fn into_forecast(self) -> Result<Forecast, String> {
        let slots = self
            .list
            .into_iter()
            .map(ApiSlot::into_slot)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Forecast {
            city: self.city.name,
            country: self.city.country,
            slots,
        })
    }
}
