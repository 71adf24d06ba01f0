//! JSON forecast API

use application::ForecastReport;
use axum::{
    Json,
    extract::{Query, State},
};
use domain::CityName;
use tracing::instrument;

use super::ForecastQuery;
use crate::{error::ApiError, state::AppState};

/// `GET /api/v1/forecast?city=...[&date=YYYY-MM-DD]`
#[instrument(skip(state))]
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> Result<Json<ForecastReport>, ApiError> {
    let reports = state.reports.as_ref().ok_or_else(|| {
        ApiError::ServiceUnavailable(state.setup_error.clone().unwrap_or_default())
    })?;

    let input = query
        .city
        .ok_or_else(|| ApiError::BadRequest("query parameter 'city' is required".to_string()))?;
    let city = CityName::new(input).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let report = match query.date {
        Some(date) => reports.for_date(&city, date).await?,
        None => reports.tomorrow(&city).await?,
    };

    Ok(Json(report))
}
