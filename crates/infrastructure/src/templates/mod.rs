//! Template engine for the forecast page and the plain-text summary
//!
//! Uses Tera with templates embedded at compile time:
//! - `forecast/page.html`: the single web page (form, metrics, AI forecast)
//! - `forecast/summary.txt`: the raw summary block printed by the CLI
//!
//! # Example
//!
//! ```rust,ignore
//! use infrastructure::templates::{ForecastPage, TemplateEngine};
//!
//! let engine = TemplateEngine::new()?;
//! let html = engine.render_forecast_page(&ForecastPage::empty("Mumbai"))?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use application::ForecastReport;
use domain::DailySummary;
use serde::{Deserialize, Serialize};
use tera::{Context, Tera, Value};
use thiserror::Error;
use tracing::debug;

/// Error type for template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template not found
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Render(String),

    /// Template compilation failed
    #[error("Template compilation failed: {0}")]
    Compile(String),
}

impl From<tera::Error> for TemplateError {
    fn from(e: tera::Error) -> Self {
        match e.kind {
            tera::ErrorKind::TemplateNotFound(name) => Self::NotFound(name),
            _ => Self::Render(e.to_string()),
        }
    }
}

/// Template context wrapper
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    inner: Context,
}

impl TemplateContext {
    /// Create a new empty template context
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Context::new(),
        }
    }

    /// Insert a value into the context
    pub fn insert<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        self.inner.insert(key, value);
    }
}

/// Display-ready values of one forecast report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastView {
    pub city: String,
    pub forecast_date: String,
    pub forecast_time: String,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub humidity: u8,
    pub rain_probability: f64,
    pub description: String,
    pub wind: String,
    pub pressure: u32,
    pub narrative: String,
}

impl ForecastView {
    /// Build from a summary and its narrative
    #[must_use]
    pub fn new(summary: &DailySummary, narrative: impl Into<String>) -> Self {
        Self {
            city: summary.city.clone(),
            forecast_date: summary.target_date.format("%Y-%m-%d").to_string(),
            forecast_time: summary.forecast_time(),
            temperature_max: summary.temperature_max,
            temperature_min: summary.temperature_min,
            humidity: summary.humidity.value(),
            rain_probability: summary.rain_probability_avg_percent,
            description: summary.description.clone(),
            wind: summary.wind_speed.to_string(),
            pressure: summary.pressure,
            narrative: narrative.into(),
        }
    }
}

impl From<&ForecastReport> for ForecastView {
    fn from(report: &ForecastReport) -> Self {
        Self::new(&report.summary, report.narrative.clone())
    }
}

/// Data for the forecast page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ForecastPage {
    /// Value shown in the city input
    pub city_input: String,
    /// Rendered report, if one was produced
    #[serde(default)]
    pub report: Option<ForecastView>,
    /// Error banner text
    #[serde(default)]
    pub error: Option<String>,
}

impl ForecastPage {
    /// Page with only the form
    #[must_use]
    pub fn empty(city_input: impl Into<String>) -> Self {
        Self {
            city_input: city_input.into(),
            ..Self::default()
        }
    }

    /// Page showing a report
    #[must_use]
    pub fn with_report(city_input: impl Into<String>, report: ForecastView) -> Self {
        Self {
            city_input: city_input.into(),
            report: Some(report),
            error: None,
        }
    }

    /// Page showing an error banner
    #[must_use]
    pub fn with_error(city_input: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            city_input: city_input.into(),
            report: None,
            error: Some(error.into()),
        }
    }
}

/// Embedded templates - compiled into the binary
mod embedded {
    pub const FORECAST_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Mausam - AI Weather Forecast</title>
    <style>
        body { font-family: Arial, sans-serif; line-height: 1.6; max-width: 720px; margin: 2rem auto; padding: 0 1rem; }
        .metrics { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
        .metric .label { color: #666; font-size: 0.9rem; }
        .metric .value { font-size: 1.8rem; }
        .error { background: #fde8e8; color: #9b1c1c; padding: 0.75rem; border-radius: 4px; }
        .success { background: #e6f6ec; color: #1e6b3a; padding: 0.75rem; border-radius: 4px; }
        .forecast { background: #e8f1fd; padding: 0.75rem; border-radius: 4px; }
    </style>
</head>
<body>
    <h1>🌤️ AI-Powered Weather Forecast for Indian Cities</h1>
    <p>Get conversational weather forecasts powered by Gemini AI!</p>
{% if error %}
    <div class="error" role="alert">{{ error }}</div>
{% endif %}
    <form method="get" action="/forecast">
        <label for="city">Enter an Indian City Name:</label>
        <input type="text" id="city" name="city" value="{{ city_input }}">
        <button type="submit">Get Forecast</button>
    </form>
{% if report %}
    <p class="success">✅ Weather data retrieved for {{ report.city }}</p>
    <h2>📊 Weather for {{ report.city }}</h2>
    <div class="metrics">
        <div class="metric"><div class="label">Max Temp</div><div class="value">{{ report.temperature_max | fixed1 }}°C</div></div>
        <div class="metric"><div class="label">Min Temp</div><div class="value">{{ report.temperature_min | fixed1 }}°C</div></div>
        <div class="metric"><div class="label">Humidity</div><div class="value">{{ report.humidity }}%</div></div>
        <div class="metric"><div class="label">Rain Probability</div><div class="value">{{ report.rain_probability | fixed1 }}%</div></div>
    </div>
    <p><strong>Weather Condition</strong>: {{ report.description | title }}</p>
    <p><strong>Forecast Date</strong>: {{ report.forecast_time }}</p>
    <h2>🤖 AI Forecast:</h2>
    <div class="forecast">{{ report.narrative | linebreaksbr | safe }}</div>
{% endif %}
</body>
</html>
"#;

    pub const FORECAST_SUMMARY: &str = r"City: {{ city }}
Date: {{ forecast_date }}
Forecast Time: {{ forecast_time }}
Max Temp: {{ temperature_max | fixed1 }}°C
Min Temp: {{ temperature_min | fixed1 }}°C
Humidity: {{ humidity }}%
Conditions: {{ description }}
Wind Speed: {{ wind }}
Pressure: {{ pressure }} hPa
Rain Probability: {{ rain_probability | fixed1 }}%";
}

/// Template engine using Tera
#[derive(Clone)]
pub struct TemplateEngine {
    tera: Arc<Tera>,
}

impl std::fmt::Debug for TemplateEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateEngine")
            .field("templates", &self.template_names())
            .finish_non_exhaustive()
    }
}

impl TemplateEngine {
    pub const PAGE: &'static str = "forecast/page.html";
    pub const SUMMARY: &'static str = "forecast/summary.txt";

    /// Create the engine with the embedded templates
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Compile` if an embedded template fails to parse.
    pub fn new() -> Result<Self, TemplateError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html", ".htm", ".xml"]);

        tera.register_filter("fixed1", fixed1_filter);
        tera.register_filter("linebreaksbr", linebreaksbr_filter);

        tera.add_raw_template(Self::PAGE, embedded::FORECAST_PAGE)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;
        tera.add_raw_template(Self::SUMMARY, embedded::FORECAST_SUMMARY)
            .map_err(|e| TemplateError::Compile(e.to_string()))?;

        debug!(count = tera.get_template_names().count(), "Templates loaded");

        Ok(Self {
            tera: Arc::new(tera),
        })
    }

    /// Render a template with the given context
    ///
    /// # Errors
    ///
    /// Returns an error if the template is unknown or rendering fails.
    pub fn render(
        &self,
        template_name: &str,
        context: &TemplateContext,
    ) -> Result<String, TemplateError> {
        self.tera
            .render(template_name, &context.inner)
            .map_err(TemplateError::from)
    }

    /// Render the forecast web page
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_forecast_page(&self, page: &ForecastPage) -> Result<String, TemplateError> {
        let mut ctx = TemplateContext::new();
        ctx.insert("city_input", &page.city_input);
        ctx.insert("report", &page.report);
        ctx.insert("error", &page.error);

        self.render(Self::PAGE, &ctx)
    }

    /// Render the raw summary block
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub fn render_summary_text(&self, summary: &DailySummary) -> Result<String, TemplateError> {
        let view = ForecastView::new(summary, String::new());
        let mut ctx = TemplateContext::new();
        ctx.insert("city", &view.city);
        ctx.insert("forecast_date", &view.forecast_date);
        ctx.insert("forecast_time", &view.forecast_time);
        ctx.insert("temperature_max", &view.temperature_max);
        ctx.insert("temperature_min", &view.temperature_min);
        ctx.insert("humidity", &view.humidity);
        ctx.insert("description", &view.description);
        ctx.insert("wind", &view.wind);
        ctx.insert("pressure", &view.pressure);
        ctx.insert("rain_probability", &view.rain_probability);

        self.render(Self::SUMMARY, &ctx)
    }

    fn template_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tera.get_template_names().collect();
        names.sort_unstable();
        names
    }
}

/// Custom filter: Format a number with exactly one decimal
fn fixed1_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let n = value
        .as_f64()
        .ok_or_else(|| tera::Error::msg("fixed1 requires a number"))?;
    Ok(Value::String(format!("{n:.1}")))
}

/// Custom filter: Escape, then convert newlines to <br> tags
fn linebreaksbr_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let s = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("linebreaksbr requires a string"))?;
    Ok(Value::String(
        tera::escape_html(s).replace('\n', "<br>\n"),
    ))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use domain::{Humidity, WindSpeed};

    use super::*;

    fn summary(wind_speed: WindSpeed) -> DailySummary {
        let date = NaiveDate::from_ymd_opt(2025, 11, 6).unwrap();
        DailySummary {
            city: "Mumbai".to_string(),
            target_date: date,
            representative_timestamp: date.and_hms_opt(12, 0, 0).unwrap(),
            temperature_max: 32.5,
            temperature_min: 24.1,
            humidity: Humidity::new(75).unwrap(),
            description: "clear sky".to_string(),
            wind_speed,
            pressure: 1012,
            rain_probability_avg_percent: 10.0,
        }
    }

    #[test]
    fn test_template_engine_creation() {
        let engine = TemplateEngine::new().unwrap();
        assert_eq!(
            engine.template_names(),
            vec![TemplateEngine::PAGE, TemplateEngine::SUMMARY]
        );
    }

    #[test]
    fn test_empty_page_has_form_with_default_city() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render_forecast_page(&ForecastPage::empty("Mumbai"))
            .unwrap();

        assert!(html.contains(r#"action="/forecast""#));
        assert!(html.contains(r#"name="city" value="Mumbai""#));
        assert!(html.contains("Get Forecast"));
        assert!(!html.contains("Max Temp"));
        assert!(!html.contains(r#"role="alert""#));
    }

    #[test]
    fn test_report_page_shows_metrics() {
        let engine = TemplateEngine::new().unwrap();
        let view = ForecastView::new(&summary(WindSpeed::Measured(3.5)), "Sunny and warm.");
        let html = engine
            .render_forecast_page(&ForecastPage::with_report("mumbai", view))
            .unwrap();

        assert!(html.contains("Max Temp"));
        assert!(html.contains("32.5°C"));
        assert!(html.contains("24.1°C"));
        assert!(html.contains("75%"));
        assert!(html.contains("10.0%"));
        assert!(html.contains("Clear Sky"));
        assert!(html.contains("<strong>Forecast Date</strong>: 2025-11-06 12:00:00"));
        assert!(html.contains("Sunny and warm."));
    }

    #[test]
    fn test_error_page_shows_banner() {
        let engine = TemplateEngine::new().unwrap();
        let html = engine
            .render_forecast_page(&ForecastPage::with_error(
                "Atlantis",
                "Could not retrieve weather data. Please check the city name and try again.",
            ))
            .unwrap();

        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains("Could not retrieve weather data."));
        assert!(!html.contains("Max Temp"));
    }

    #[test]
    fn test_page_escapes_user_input() {
        let engine = TemplateEngine::new().unwrap();
        let view = ForecastView::new(&summary(WindSpeed::Unavailable), "<b>hot</b>\nday");
        let html = engine
            .render_forecast_page(&ForecastPage::with_report("<script>", view))
            .unwrap();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;hot&lt;&#x2F;b&gt;<br>"));
    }

    #[test]
    fn test_summary_text() {
        let engine = TemplateEngine::new().unwrap();
        let text = engine
            .render_summary_text(&summary(WindSpeed::Measured(3.5)))
            .unwrap();

        assert!(text.contains("City: Mumbai"));
        assert!(text.contains("Forecast Time: 2025-11-06 12:00:00"));
        assert!(text.contains("Max Temp: 32.5°C"));
        assert!(text.contains("Wind Speed: 3.5 m/s"));
        assert!(text.contains("Pressure: 1012 hPa"));
        assert!(text.contains("Rain Probability: 10.0%"));
    }

    #[test]
    fn test_summary_text_without_wind() {
        let engine = TemplateEngine::new().unwrap();
        let text = engine
            .render_summary_text(&summary(WindSpeed::Unavailable))
            .unwrap();

        assert!(text.contains("not available"));
        assert!(!text.contains("0 m/s"));
    }

    #[test]
    fn test_fixed1_filter() {
        let value = serde_json::json!(10);
        let result = fixed1_filter(&value, &HashMap::new()).unwrap();
        assert_eq!(result.as_str().unwrap(), "10.0");

        assert!(fixed1_filter(&Value::String("x".into()), &HashMap::new()).is_err());
    }
}
