// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Strava-Weekly CLI
//!
//! Prints a summary of one week of runs pulled from the Strava API.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use strava_weekly::{
    config::{Config, ConfigError, ConfigOverrides},
    error::AppError,
    report,
    services::TerminalPrompt,
    time_utils, AppState,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "strava-weekly", version, about = "Weekly running summary from Strava")]
struct Cli {
    /// How many weeks before the current one to report on
    #[arg(long, env = "STRAVA_WEEKS_AGO", default_value_t = 2)]
    weeks_ago: u32,

    /// Activity type to summarize
    #[arg(long, default_value = "Run")]
    sport: String,

    /// Token file location (overrides STRAVA_TOKEN_FILE)
    #[arg(long)]
    token_file: Option<PathBuf>,

    /// Maximum number of pages to request (overrides STRAVA_MAX_PAGES)
    #[arg(long)]
    max_pages: Option<u32>,

    /// Do not try to open the authorization URL in a browser
    #[arg(long)]
    no_browser: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();
    // Before parsing so `.env` can supply STRAVA_WEEKS_AGO
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    println!("\n🏃 Strava Weekly Running Distance Fetcher");
    println!("{}", "=".repeat(50));

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("\n⚠️  Configuration Required: {e}");
            print_setup_help();
            return ExitCode::FAILURE;
        }
    };

    let token_file = config.token_file.clone();
    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\n❌ {}: {e:#}", failure_label(&e));
            let unauthorized = e
                .downcast_ref::<AppError>()
                .is_some_and(|err| err.is_unauthorized());
            if unauthorized {
                eprintln!(
                    "   Token may be invalid. Delete {} and try again.",
                    token_file.display()
                );
            }
            ExitCode::FAILURE
        }
    }
}

fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    Config::from_env(&ConfigOverrides {
        token_file: cli.token_file.clone(),
        max_pages: cli.max_pages,
    })
}

/// `API Error` for HTTP failures reported by Strava, `Error` otherwise.
fn failure_label(err: &anyhow::Error) -> &'static str {
    if err.downcast_ref::<AppError>().is_some_and(AppError::is_http) {
        "API Error"
    } else {
        "Error"
    }
}

async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    tracing::info!(
        token_file = %config.token_file.display(),
        max_pages = config.max_pages,
        per_page = config.per_page,
        "Starting weekly report"
    );

    let prompt = Box::new(TerminalPrompt::new(!cli.no_browser));
    let state = AppState::new(config, prompt);

    let week = time_utils::current_week_window(cli.weeks_ago)?;
    let weekly = report::build_weekly_report(&state.session, &state.fetcher, week, &cli.sport)
        .await
        .context("Failed to build weekly report")?;

    print!("{weekly}");
    Ok(())
}

fn print_setup_help() {
    eprintln!("\nPlease set up your Strava API credentials:");
    eprintln!("1. Go to https://www.strava.com/settings/api");
    eprintln!("2. Create an application (use any name/website)");
    eprintln!("3. Set environment variables (or put them in .env):");
    eprintln!("   export STRAVA_CLIENT_ID='your_client_id'");
    eprintln!("   export STRAVA_CLIENT_SECRET='your_client_secret'");
}

/// Initialize logging to stderr; `LOG_FORMAT=json` switches to structured JSON.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("strava_weekly=info,warn"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
