//! StakeHedge - hedged stake calculator service
//!
//! Usage: cargo run --release

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stakehedge::api;
use stakehedge::config::{AppConfig, LoggingConfig};

fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    if logging.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.logging);

    info!("StakeHedge v{} starting", env!("CARGO_PKG_VERSION"));
    info!("Config: {}", config);

    api::start_server(&config).await
}
