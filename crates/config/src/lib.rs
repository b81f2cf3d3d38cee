//! Configuration management for the trading copilot
//!
//! Supports loading configuration from:
//! - YAML/TOML files (config/default, config/{env})
//! - Environment variables (TRADING_COPILOT prefix, `__` separator)
//!
//! The one required secret, the provider API key, is read from the
//! environment at startup. Its absence is not a load error: the assistant
//! surfaces it as a persistent "not connected" status instead of failing
//! silently, so `ProviderConfig::api_key` stays an `Option`.

pub mod constants;
pub mod settings;

pub use settings::{
    load_settings, MarketFeedConfig, ObservabilityConfig, ProviderConfig, RuntimeEnvironment,
    Settings, SpeechSettings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
