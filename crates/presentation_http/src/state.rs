//! Application state shared across handlers

use std::sync::Arc;

use application::{ApplicationError, ReportService};
use infrastructure::{
    AppConfig, Credentials, TemplateEngine, TemplateError, build_report_service,
    config::missing_key_message,
};

/// Shared application state
///
/// `reports` is `None` when an API key is missing; every request then shows
/// `setup_error` instead of calling the providers.
#[derive(Clone)]
pub struct AppState {
    /// Report service, present only when both keys are configured
    pub reports: Option<Arc<ReportService>>,
    /// Banner text explaining why `reports` is absent
    pub setup_error: Option<String>,
    /// Page templates
    pub templates: TemplateEngine,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("configured", &self.reports.is_some())
            .field("setup_error", &self.setup_error)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// State with a working report service
    pub const fn ready(reports: Arc<ReportService>, templates: TemplateEngine) -> Self {
        Self {
            reports: Some(reports),
            setup_error: None,
            templates,
        }
    }

    /// State that only reports a setup problem
    pub fn unconfigured(message: impl Into<String>, templates: TemplateEngine) -> Self {
        Self {
            reports: None,
            setup_error: Some(message.into()),
            templates,
        }
    }

    /// Build the state from configuration and credentials
    ///
    /// A missing key yields an unconfigured state rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the templates fail to compile or an HTTP client
    /// cannot be built.
    pub fn build(config: &AppConfig, credentials: &Credentials) -> Result<Self, StateError> {
        let templates = TemplateEngine::new()?;

        match build_report_service(config, credentials) {
            Ok(reports) => Ok(Self::ready(Arc::new(reports), templates)),
            Err(ApplicationError::MissingCredential(var)) => {
                Ok(Self::unconfigured(missing_key_message(&var), templates))
            },
            Err(e) => Err(StateError::Service(e)),
        }
    }
}

/// Error building the application state
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Templates(#[from] TemplateError),

    #[error(transparent)]
    Service(ApplicationError),
}
