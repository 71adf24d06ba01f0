//! Subcommand implementations

use std::{process::ExitCode, sync::Arc};

use application::{
    ApplicationError, ForecastReport, NarrativeService, ReportService, ports::InferencePort,
};
use chrono::NaiveDate;
use domain::CityName;
use infrastructure::{
    AppConfig, Credentials, GeminiInferenceAdapter, TemplateEngine, build_report_service,
    config::missing_key_message,
};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

const TITLE: &str = "AI-Powered Weather Forecast for Indian Cities";
const CITY_PROMPT: &str = "Enter an Indian city name: ";
const NO_WEATHER: &str = "Could not retrieve weather data.";

/// `forecast <CITY>`
pub async fn forecast(
    config: &AppConfig,
    credentials: &Credentials,
    city: &str,
    date: Option<NaiveDate>,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let Some(service) = report_service(config, credentials)? else {
        return Ok(ExitCode::FAILURE);
    };

    let Some(report) = fetch(&service, city, date).await else {
        println!("{NO_WEATHER}");
        return Ok(ExitCode::FAILURE);
    };

    print_report(&report, json)?;
    Ok(ExitCode::SUCCESS)
}

/// `interactive`: prompt on stdin, then behave like `forecast`
pub async fn interactive(
    config: &AppConfig,
    credentials: &Credentials,
    json: bool,
) -> anyhow::Result<ExitCode> {
    println!("{TITLE}");

    let mut stdout = tokio::io::stdout();
    stdout.write_all(CITY_PROMPT.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;

    forecast(config, credentials, &line, None, json).await
}

/// `check-gemini`: key presence, then one round trip to the model
pub async fn check_gemini(config: &AppConfig, credentials: &Credentials) -> ExitCode {
    let key = match credentials.gemini_api_key() {
        Ok(key) => {
            println!("✅ Gemini API key found in .env");
            key.clone()
        },
        Err(_) => {
            println!("❌ No Gemini API key found in .env file");
            return ExitCode::FAILURE;
        },
    };

    let adapter = match GeminiInferenceAdapter::new(config.inference.clone(), key) {
        Ok(adapter) => Arc::new(adapter),
        Err(e) => {
            println!("❌ Error calling Gemini API: {e}");
            return ExitCode::FAILURE;
        },
    };

    let narrative = NarrativeService::new(Arc::clone(&adapter) as Arc<dyn InferencePort>);
    let model = narrative.current_model();
    println!("✅ Gemini configured successfully (model {model})");

    match adapter.available_models().await {
        Ok(models) if models.contains(&model) => {
            println!("✅ Model {model} is available ({} models listed)", models.len());
        },
        Ok(models) => {
            println!("⚠️ Model {model} is not among the {} listed models", models.len());
        },
        Err(e) => println!("⚠️ Could not list models: {e}"),
    }

    match narrative.probe().await {
        Ok(text) => {
            println!("✅ Gemini response: {text}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            println!("❌ Error calling Gemini API: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Build the service, or report the missing key and return `None`
fn report_service(
    config: &AppConfig,
    credentials: &Credentials,
) -> anyhow::Result<Option<ReportService>> {
    match build_report_service(config, credentials) {
        Ok(service) => Ok(Some(service)),
        Err(ApplicationError::MissingCredential(var)) => {
            eprintln!("{}", missing_key_message(&var));
            Ok(None)
        },
        Err(e) => Err(e.into()),
    }
}

async fn fetch(
    service: &ReportService,
    input: &str,
    date: Option<NaiveDate>,
) -> Option<ForecastReport> {
    let city = CityName::new(input)
        .map_err(|e| warn!(error = %e, "Rejected city input"))
        .ok()?;

    let result = match date {
        Some(date) => service.for_date(&city, date).await,
        None => service.tomorrow(&city).await,
    };

    result
        .map_err(|e| warn!(error = %e, city = %city, "Forecast failed"))
        .ok()
}

fn print_report(report: &ForecastReport, json: bool) -> anyhow::Result<()> {
    println!("\nRaw Weather Data:");
    if json {
        println!("{}", serde_json::to_string_pretty(&report.summary)?);
    } else {
        let templates = TemplateEngine::new()?;
        println!("{}", templates.render_summary_text(&report.summary)?);
    }

    println!("\nAI-Generated Forecast:");
    println!("{}", report.narrative);
    Ok(())
}
