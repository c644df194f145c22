//! Configuration types and re-exports

pub use super::{AppConfig, EngineConfig, LoggingConfig, ServerConfig};
