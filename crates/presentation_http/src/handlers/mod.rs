//! HTTP request handlers

pub mod forecast;
pub mod health;
pub mod page;

use serde::Deserialize;

/// City shown in the form before anything is submitted
pub const DEFAULT_CITY: &str = "Mumbai";

/// Query string of the forecast endpoints
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ForecastQuery {
    /// City entered by the user
    #[serde(default)]
    pub city: Option<String>,
    /// Explicit date (`YYYY-MM-DD`), defaults to tomorrow
    #[serde(default)]
    pub date: Option<chrono::NaiveDate>,
}
