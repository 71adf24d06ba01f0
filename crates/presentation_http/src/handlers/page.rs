//! HTML page handlers

use axum::{
    extract::{Query, State},
    response::Html,
};
use domain::CityName;
use infrastructure::{ForecastPage, ForecastView};
use tracing::{info, warn};

use super::{DEFAULT_CITY, ForecastQuery};
use crate::{
    error::{ApiError, WEATHER_UNAVAILABLE},
    state::AppState,
};

/// The form, with the default city filled in
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let page = match &state.setup_error {
        Some(message) => ForecastPage::with_error(DEFAULT_CITY, message.clone()),
        None => ForecastPage::empty(DEFAULT_CITY),
    };
    render(&state, &page)
}

/// The form plus tomorrow's forecast for the submitted city
pub async fn forecast_page(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Html<String>, ApiError> {
    let input = query.city.unwrap_or_else(|| DEFAULT_CITY.to_string());

    let page = match (&state.reports, &state.setup_error) {
        (Some(reports), _) => match CityName::new(&input) {
            Ok(city) => {
                let result = match query.date {
                    Some(date) => reports.for_date(&city, date).await,
                    None => reports.tomorrow(&city).await,
                };
                match result {
                    Ok(report) => {
                        info!(city = %report.summary.city, "Rendering forecast page");
                        ForecastPage::with_report(&input, ForecastView::from(&report))
                    },
                    Err(e) => {
                        warn!(error = %e, city = %city, "Forecast failed");
                        ForecastPage::with_error(&input, WEATHER_UNAVAILABLE)
                    },
                }
            },
            Err(e) => {
                warn!(error = %e, "Rejected city input");
                ForecastPage::with_error(&input, WEATHER_UNAVAILABLE)
            },
        },
        (None, message) => ForecastPage::with_error(
            &input,
            message.clone().unwrap_or_else(|| WEATHER_UNAVAILABLE.to_string()),
        ),
    };

    render(&state, &page)
}

fn render(state: &AppState, page: &ForecastPage) -> Result<Html<String>, ApiError> {
    state
        .templates
        .render_forecast_page(page)
        .map(Html)
        .map_err(|e| ApiError::Internal(e.to_string()))
}
