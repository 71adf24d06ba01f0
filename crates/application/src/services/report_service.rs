//! Report service - Summary plus narrative for one request

use std::sync::Arc;

use chrono::NaiveDate;
use domain::{CityName, DailySummary};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    error::ApplicationError,
    ports::{InferencePort, WeatherPort},
    services::{ForecastService, NarrativeService},
};

/// Everything shown to the user for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub summary: DailySummary,
    pub narrative: String,
}

/// Runs the weather call, then the narrative call, for one request
#[derive(Debug)]
pub struct ReportService {
    forecast: ForecastService,
    narrative: NarrativeService,
}

impl ReportService {
    /// Create a report service over both ports
    pub fn new(weather: Arc<dyn WeatherPort>, inference: Arc<dyn InferencePort>) -> Self {
        Self {
            forecast: ForecastService::new(weather),
            narrative: NarrativeService::new(inference),
        }
    }

    /// Tomorrow's report for `city`
    ///
    /// # Errors
    ///
    /// Returns an error only when weather data cannot be obtained; narrative
    /// failures are absorbed into the apology text.
    #[instrument(skip(self), fields(city = %city))]
    pub async fn tomorrow(&self, city: &CityName) -> Result<ForecastReport, ApplicationError> {
        let summary = self.forecast.tomorrow_summary(city).await?;
        Ok(self.complete(summary).await)
    }

    /// Report for an explicit date
    ///
    /// # Errors
    ///
    /// Returns an error only when weather data cannot be obtained.
    pub async fn for_date(
        &self,
        city: &CityName,
        date: NaiveDate,
    ) -> Result<ForecastReport, ApplicationError> {
        let summary = self.forecast.summary_for_date(city, date).await?;
        Ok(self.complete(summary).await)
    }

    async fn complete(&self, summary: DailySummary) -> ForecastReport {
        let narrative = self.narrative.narrate(&summary).await;
        info!(
            city = %summary.city,
            date = %summary.target_date,
            "Forecast report ready"
        );
        ForecastReport { summary, narrative }
    }

    /// The forecast half of the service
    pub const fn forecast(&self) -> &ForecastService {
        &self.forecast
    }

    /// The narrative half of the service
    pub const fn narrative(&self) -> &NarrativeService {
        &self.narrative
    }
}
