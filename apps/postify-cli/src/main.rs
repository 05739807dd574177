//! # Postify CLI
//!
//! Terminal front-end for the Postify API.

use clap::Parser;

mod commands;
mod config;
mod state;
mod telemetry;

use commands::Cli;
use config::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::from_env().with_api_url(cli.api_url);

    telemetry::init_telemetry(&config.telemetry);
    tracing::debug!(api_url = %config.remote.base_url, "Starting Postify CLI");

    let state = AppState::new(&config)?;
    commands::run(cli.command, &state).await
}
