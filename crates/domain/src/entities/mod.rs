//! Domain entities

mod daily_summary;
mod weather_sample;

pub use daily_summary::DailySummary;
pub use weather_sample::WeatherSample;
