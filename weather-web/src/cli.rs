use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use weather_core::{Config, WeatherLookup, config::ENV_API_KEY, provider_from_config};

use crate::{page::Pages, server};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-web", version, about = "Weather dashboard web server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server.
    Serve {
        /// Listen address, e.g. "0.0.0.0:8000". Overrides config and WEATHER_BIND.
        #[arg(long)]
        bind: Option<String>,

        /// Path to the config file; defaults to the platform config directory.
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure {
        /// Path to the config file; defaults to the platform config directory.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Serve { bind, config } => serve(bind, config).await,
            Command::Configure { config } => configure(config),
        }
    }
}

fn config_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Config::config_file_path(),
    }
}

async fn serve(bind: Option<String>, config: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path(config)?;
    let mut config = Config::load_from(&path)?;
    if let Some(bind) = bind {
        config.bind = bind;
    }
    info!(
        path = %path.display(),
        endpoint = %config.endpoint,
        timeout_secs = config.timeout_secs,
        "configuration loaded"
    );

    if !config.has_api_key() {
        warn!(
            "no OpenWeather API key configured; set {ENV_API_KEY} or run `weather-web configure`. \
             Lookups will fail until one is provided"
        );
    }

    let provider = provider_from_config(&config)?;
    let pages = Pages::new().context("Failed to compile page templates")?;
    let state = server::AppState::new(WeatherLookup::new(provider), pages);

    server::serve(&config.bind, state).await
}

fn configure(config: Option<PathBuf>) -> anyhow::Result<()> {
    let path = config_path(config)?;
    let mut cfg = Config::read_file(&path)?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .prompt()
        .context("Failed to read API key")?;

    cfg.set_api_key(api_key.trim().to_string());
    cfg.save_to(&path)?;

    println!("Saved API key to {}", path.display());
    Ok(())
}
