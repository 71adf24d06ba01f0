//! Adapters implementing application ports

mod gemini_inference_adapter;
mod weather_adapter;

use std::sync::Arc;

use application::{ApplicationError, ReportService};
pub use gemini_inference_adapter::GeminiInferenceAdapter;
pub use weather_adapter::WeatherAdapter;

use crate::config::{AppConfig, Credentials};

/// Wire both provider adapters into a [`ReportService`]
///
/// # Errors
///
/// Returns `MissingCredential` when either API key is absent, or an error if
/// an HTTP client cannot be built.
pub fn build_report_service(
    config: &AppConfig,
    credentials: &Credentials,
) -> Result<ReportService, ApplicationError> {
    let weather = WeatherAdapter::new(
        config.weather.clone(),
        credentials.openweather_api_key()?.clone(),
    )?;
    let inference = GeminiInferenceAdapter::new(
        config.inference.clone(),
        credentials.gemini_api_key()?.clone(),
    )?;

    Ok(ReportService::new(Arc::new(weather), Arc::new(inference)))
}
