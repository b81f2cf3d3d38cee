//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{endpoints, limits, market, speech, timeouts};
use crate::ConfigError;

/// Runtime environment enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Development mode - relaxed validation, warnings only
    #[default]
    Development,
    /// Production mode - all validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Runtime environment (development, production)
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Chat-completion provider configuration
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Speech bridge defaults
    #[serde(default)]
    pub speech: SpeechSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Mock market feed configuration
    #[serde(default)]
    pub market: MarketFeedConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    ///
    /// A missing API key is deliberately NOT an error here: the assistant
    /// reports it as a persistent "not connected" status instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_provider()?;
        self.validate_speech()?;
        self.validate_market()?;
        Ok(())
    }

    fn validate_provider(&self) -> Result<(), ConfigError> {
        let provider = &self.provider;

        if provider.endpoint.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "provider.endpoint".to_string(),
                message: "Endpoint cannot be empty".to_string(),
            });
        }

        if !provider.endpoint.starts_with("http://") && !provider.endpoint.starts_with("https://")
        {
            return Err(ConfigError::InvalidValue {
                field: "provider.endpoint".to_string(),
                message: format!("Expected an http(s) URL, got '{}'", provider.endpoint),
            });
        }

        if provider.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "provider.timeout_ms".to_string(),
                message: "Timeout must be at least 1ms".to_string(),
            });
        }

        if let Some(key) = &provider.api_key {
            if key.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "provider.api_key".to_string(),
                    message: "API key is set but blank".to_string(),
                });
            }
        } else if self.environment.is_production() {
            tracing::warn!(
                "No provider API key configured; AI features will report a not-connected status"
            );
        }

        Ok(())
    }

    fn validate_speech(&self) -> Result<(), ConfigError> {
        let s = &self.speech;

        for (field, value) in [("rate", s.rate), ("pitch", s.pitch), ("volume", s.volume)] {
            if !(0.0..=10.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: format!("speech.{}", field),
                    message: format!("Must be between 0.0 and 10.0, got {}", value),
                });
            }
        }

        if s.lang.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "speech.lang".to_string(),
                message: "Recognition locale cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    fn validate_market(&self) -> Result<(), ConfigError> {
        if self.market.symbols.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "market.symbols".to_string(),
                message: "Mock feed needs at least one symbol".to_string(),
            });
        }

        if !(0.0..1.0).contains(&self.market.max_tick_drift) {
            return Err(ConfigError::InvalidValue {
                field: "market.max_tick_drift".to_string(),
                message: format!(
                    "Must be a fraction in [0.0, 1.0), got {}",
                    self.market.max_tick_drift
                ),
            });
        }

        Ok(())
    }
}

/// Chat-completion provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// API credential. Read from OPENAI_API_KEY when not set explicitly;
    /// `None` means the assistant runs in a visible not-connected state.
    #[serde(default = "default_api_key")]
    pub api_key: Option<String>,

    /// Chat-completion API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty())
}

fn default_endpoint() -> String {
    endpoints::OPENAI_DEFAULT.to_string()
}

fn default_timeout_ms() -> u64 {
    timeouts::LLM_REQUEST_MS
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: default_api_key(),
            endpoint: default_endpoint(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// Speech bridge defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechSettings {
    /// Recognition locale
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Synthesis rate
    #[serde(default = "default_rate")]
    pub rate: f32,

    /// Synthesis pitch
    #[serde(default = "default_pitch")]
    pub pitch: f32,

    /// Synthesis volume
    #[serde(default = "default_volume")]
    pub volume: f32,
}

fn default_lang() -> String {
    speech::DEFAULT_LANG.to_string()
}
fn default_rate() -> f32 {
    speech::DEFAULT_RATE
}
fn default_pitch() -> f32 {
    speech::DEFAULT_PITCH
}
fn default_volume() -> f32 {
    speech::DEFAULT_VOLUME
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            rate: default_rate(),
            pitch: default_pitch(),
            volume: default_volume(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Mock market feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketFeedConfig {
    /// Symbol universe for the mock feed
    #[serde(default = "default_symbols")]
    pub symbols: Vec<String>,

    /// Maximum per-tick price perturbation, as a fraction of last price
    #[serde(default = "default_max_tick_drift")]
    pub max_tick_drift: f64,

    /// Maximum text input length accepted before an AI call
    #[serde(default = "default_max_text_chars")]
    pub max_text_chars: usize,
}

fn default_symbols() -> Vec<String> {
    market::DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect()
}
fn default_max_tick_drift() -> f64 {
    market::MAX_TICK_DRIFT
}
fn default_max_text_chars() -> usize {
    limits::MAX_TEXT_CHARS
}

impl Default for MarketFeedConfig {
    fn default() -> Self {
        Self {
            symbols: default_symbols(),
            max_tick_drift: default_max_tick_drift(),
            max_text_chars: default_max_text_chars(),
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (TRADING_COPILOT prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("TRADING_COPILOT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
