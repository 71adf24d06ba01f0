//! Application services - Use case implementations

mod forecast_service;
mod narrative_service;
mod report_service;

pub use forecast_service::ForecastService;
pub use narrative_service::NarrativeService;
pub use report_service::{ForecastReport, ReportService};
