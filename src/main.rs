//! InfraDesk console entry point.
//!
//! Loads configuration, initialises logging, restores the persisted
//! session, and dispatches the requested command.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use infradesk_core::config::AppConfig;
use infradesk_core::error::AppError;
use infradesk_service::Console;

mod commands;
mod output;
mod terminal;

use commands::Cli;
use terminal::TerminalNavigator;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let cli = Cli::parse();
    if let Err(e) = run(config, cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Load configuration from the config directory and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_dir = std::env::var("INFRADESK_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
    let env = std::env::var("INFRADESK_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_dir, &env)
}

/// Initialize tracing/logging. Logs go to stderr so command output stays
/// machine-readable.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

async fn run(config: AppConfig, cli: Cli) -> Result<(), AppError> {
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Starting InfraDesk");

    let navigator = Arc::new(TerminalNavigator::new(config.navigation.clone()));
    let console = Console::bootstrap(config, navigator).await?;

    cli.execute(&console).await
}
