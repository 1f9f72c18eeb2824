// In app/src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::prelude::*;

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "Serves mock retirement plan data over HTTP.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Starts the HTTP API.
    Serve {
        /// Overrides `server.response_delay_ms` from the configuration.
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Prints a payload to stdout without starting the server.
    Print {
        #[arg(value_enum)]
        payload: Payload,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Payload {
    /// The `/api/plan` account payload.
    Legacy,
    /// The `/api/plan/v2` plan viewer payload.
    V2,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { delay_ms } => handle_serve(delay_ms).await?,
        Commands::Print { payload } => handle_print(payload)?,
    }

    Ok(())
}

/// Maps `app.log_level` to a tracing level, falling back to INFO.
/// The flag is false when the configured value was not a known level.
fn log_level(raw: &str) -> (tracing::Level, bool) {
    match raw.parse() {
        Ok(level) => (level, true),
        Err(_) => (tracing::Level::INFO, false),
    }
}

/// Installs the global subscriber. Everything below `level` is dropped.
fn init_tracing(level: tracing::Level) {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(
        tracing_subscriber::filter::Targets::new()
            .with_target("tower_http", tracing::Level::DEBUG)
            .with_default(level),
    );
    tracing_subscriber::registry().with(fmt_layer).init();
}

// --- "Serve" Subcommand Logic ---

async fn handle_serve(delay_ms: Option<u64>) -> Result<()> {
    let mut settings = app_config::load_settings()?;

    let (level, recognised) = log_level(&settings.app.log_level);
    init_tracing(level);
    if !recognised {
        tracing::warn!(
            log_level = %settings.app.log_level,
            "Unrecognised log level, falling back to info"
        );
    }
    tracing::info!(environment = %settings.app.environment, "Starting plan viewer API");

    if let Some(delay_ms) = delay_ms {
        settings.server.response_delay_ms = delay_ms;
    }

    web_server::run(settings.server).await?;

    tracing::info!("Plan viewer API has shut down.");
    Ok(())
}

// --- "Print" Subcommand Logic ---

fn handle_print(payload: Payload) -> Result<()> {
    let json = match payload {
        Payload::Legacy => {
            serde_json::to_string_pretty(&web_server::fixtures::legacy::plan_response())?
        }
        Payload::V2 => serde_json::to_string_pretty(&web_server::fixtures::viewer::plan_viewer()?)?,
    };
    println!("{json}");
    Ok(())
}
