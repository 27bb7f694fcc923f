//! Binary crate for the `weather-web` dashboard.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and logging setup
//! - HTTP routing (`GET /`, `POST /weather`)
//! - Rendering the HTML page
//!
//! ```bash
//! OPENWEATHER_API_KEY=... RUST_LOG=debug weather-web serve --bind 0.0.0.0:8000
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod page;
mod server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default log level: INFO. Override with RUST_LOG=weather_core=debug etc.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
