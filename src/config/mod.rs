//! Configuration management for StakeHedge
//!
//! Loads from optional YAML/TOML files + environment variables via .env

mod types;

pub use types::*;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::engine::{MAX_OUTCOMES, MIN_OUTCOMES};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub engine: EngineConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Outcome count used when a request omits it
    pub default_outcome_count: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// EnvFilter directive used when RUST_LOG is unset
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            engine: EngineConfig {
                default_outcome_count: 2,
            },
            logging: LoggingConfig {
                filter: "info".to_string(),
                json: false,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        // Load .env file first
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let config = Config::builder()
            // Server defaults
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            // Engine defaults
            .set_default(
                "engine.default_outcome_count",
                defaults.engine.default_outcome_count as i64,
            )?
            // Logging defaults
            .set_default("logging.filter", defaults.logging.filter)?
            .set_default("logging.json", defaults.logging.json)?
            // Load config file if exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // Override with environment variables (STAKEHEDGE_*)
            .add_source(Environment::with_prefix("STAKEHEDGE").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;
        Ok(app_config)
    }

    /// Reject values the engine cannot serve
    pub fn validate(&self) -> Result<()> {
        let count = self.engine.default_outcome_count;
        if !(MIN_OUTCOMES..=MAX_OUTCOMES).contains(&count) {
            bail!(
                "engine.default_outcome_count must be between {} and {}, got {}",
                MIN_OUTCOMES,
                MAX_OUTCOMES,
                count
            );
        }
        Ok(())
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Generate a digest of the config for logging
    pub fn digest(&self) -> String {
        format!(
            "bind={} default_outcomes={} log_filter={} json_logs={}",
            self.bind_addr(),
            self.engine.default_outcome_count,
            self.logging.filter,
            self.logging.json
        )
    }
}

impl std::fmt::Display for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.digest())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.default_outcome_count, 2);
        assert_eq!(config.bind_addr(), "0.0.0.0:5000");
    }

    #[test]
    fn out_of_range_default_outcome_count_is_rejected() {
        let mut config = AppConfig::default();
        config.engine.default_outcome_count = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn digest_mentions_bind_address() {
        assert!(AppConfig::default().to_string().contains("bind=0.0.0.0:5000"));
    }
}
