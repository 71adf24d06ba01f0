//! Mausam CLI
//!
//! Tomorrow's weather for an Indian city, with a short AI-written forecast.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod commands;

use std::process::ExitCode;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, Credentials, init_telemetry};
use tracing::{debug, warn};

/// Mausam CLI
#[derive(Parser)]
#[command(name = "mausam-cli")]
#[command(author, version, about = "AI-Powered Weather Forecast for Indian Cities", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Defaults to `interactive`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast tomorrow's weather for a city
    ///
    /// Example: mausam-cli forecast Mumbai
    Forecast {
        /// City name, e.g. "Mumbai" or "New Delhi"
        city: String,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,

        /// Forecast this date (YYYY-MM-DD) instead of tomorrow
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Prompt for a city, then forecast it
    Interactive {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the Gemini key is set and the model answers
    CheckGemini,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Set up logging based on verbosity
    let telemetry = config
        .telemetry
        .clone()
        .with_filter(log_filter_from_verbosity(cli.verbose));
    init_telemetry(&telemetry)?;

    if let Some(e) = config_error {
        warn!("Failed to load config, using defaults: {}", e);
    }

    let credentials = Credentials::from_env();
    debug!(?credentials, "Credentials loaded");

    let outcome = match cli.command.unwrap_or(Commands::Interactive { json: false }) {
        Commands::Forecast { city, json, date } => {
            commands::forecast(&config, &credentials, &city, date, json).await?
        },
        Commands::Interactive { json } => {
            commands::interactive(&config, &credentials, json).await?
        },
        Commands::CheckGemini => commands::check_gemini(&config, &credentials).await,
    };

    Ok(outcome)
}
