mod cli;
mod commands;
mod wiring;

use std::path::Path;

use spotifriend_common::ConfigError;
use spotifriend_config::schema::SpotifriendConfig;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

use crate::cli::Command;
use crate::wiring::AppContext;

fn load_config(path: Option<&Path>) -> Result<SpotifriendConfig, ConfigError> {
    match path {
        Some(path) => {
            let config = spotifriend_config::toml_loader::load_from_path(path)?;
            spotifriend_config::validation::validate(&config)?;
            Ok(config)
        }
        None => spotifriend_config::load_config(),
    }
}

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let args = cli::parse();

    // Config decides the default log level, so read it before logging starts
    let loaded = load_config(args.config.as_deref());

    // Initialize logging
    let log_directive = match (&args.log_level, &loaded) {
        (Some(level), _) => cli::level_directive(level),
        (None, Ok(config)) => config.logging.level.as_directive().to_string(),
        (None, Err(_)) => "spotifriend=info".to_string(),
    };
    let directive = log_directive
        .parse::<Directive>()
        .unwrap_or_else(|_| LevelFilter::INFO.into());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("Spotifriend v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!("Using config override: {}", path.display());
    }
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        SpotifriendConfig::default()
    });

    // Ensure platform directories exist
    if let Err(e) = spotifriend_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let ctx = match AppContext::build(config) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("Startup failed: {e}");
            std::process::exit(1);
        }
    };

    let command = args.command.unwrap_or(Command::Run);
    if let Err(e) = commands::dispatch(command, ctx).await {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
