//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Weather provider failed, refused or answered with something unusable
    #[error("Weather provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Inference/AI error
    #[error("Inference error: {0}")]
    Inference(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// A required API key is absent
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// The provider answered but had nothing for the requested date
    pub const fn is_no_forecast(&self) -> bool {
        matches!(self, Self::Domain(DomainError::NoForecastForDate(_)))
    }

    /// Weather data could not be obtained for the request
    ///
    /// Covers provider failures, empty forecasts and invalid city input.
    pub const fn is_weather_unavailable(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable(_) | Self::RateLimited | Self::Domain(_)
        )
    }
}
