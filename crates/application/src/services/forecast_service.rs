//! Forecast service - Fetch samples and reduce them to a daily summary

use std::{fmt, sync::Arc};

use chrono::{NaiveDate, Utc};
use domain::{CityName, DailySummary, noon, reduce, target_date_after};
use tracing::{debug, instrument};

use crate::{error::ApplicationError, ports::WeatherPort};

/// Service producing next-day summaries for a city
pub struct ForecastService {
    weather: Arc<dyn WeatherPort>,
}

impl fmt::Debug for ForecastService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForecastService").finish_non_exhaustive()
    }
}

impl ForecastService {
    /// Create a new forecast service
    pub fn new(weather: Arc<dyn WeatherPort>) -> Self {
        Self { weather }
    }

    /// Summary for the UTC calendar day after now
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or has no samples for tomorrow.
    pub async fn tomorrow_summary(&self, city: &CityName) -> Result<DailySummary, ApplicationError> {
        self.summary_for_date(city, target_date_after(Utc::now()))
            .await
    }

    /// Summary for an explicit date
    ///
    /// # Errors
    ///
    /// Returns an error if the provider fails or has no samples for `date`.
    #[instrument(skip(self), fields(city = %city, date = %date))]
    pub async fn summary_for_date(
        &self,
        city: &CityName,
        date: NaiveDate,
    ) -> Result<DailySummary, ApplicationError> {
        let forecast = self.weather.get_forecast(city).await?;

        debug!(
            provider_city = %forecast.city,
            samples = forecast.samples.len(),
            "Reducing forecast"
        );

        let summary = reduce(&forecast.city, &forecast.samples, date, noon())?;
        Ok(summary)
    }

    /// Check if the weather provider is reachable
    pub async fn is_healthy(&self) -> bool {
        self.weather.is_healthy().await
    }
}
