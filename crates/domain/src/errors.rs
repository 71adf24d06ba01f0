//! Domain-level errors

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// City name rejected by validation
    #[error("Invalid city name: {0}")]
    InvalidCity(String),

    /// The provider returned samples, but none fall on the requested date
    #[error("No forecast available for {0}")]
    NoForecastForDate(NaiveDate),
}
