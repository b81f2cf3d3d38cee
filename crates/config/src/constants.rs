//! Centralized constants for the trading copilot
//!
//! Single source of truth for provider endpoints, model selection and
//! per-request-kind sampling parameters. Structured request kinds are pinned
//! to low temperatures so anything that produces trading numbers stays as
//! deterministic as the provider allows.

/// Service endpoints
pub mod endpoints {
    /// OpenAI-compatible chat-completion API base
    pub const OPENAI_DEFAULT: &str = "https://api.openai.com/v1";
}

/// Model identifiers per request kind
pub mod models {
    /// Multimodal model for structured extraction and chart-image analysis
    pub const ANALYSIS: &str = "gpt-4o";

    /// Faster text model for free-text market commentary
    pub const COMMENTARY: &str = "gpt-4.1";
}

/// Sampling parameters, fixed per request kind
pub mod sampling {
    /// Voice-command interpretation
    pub const VOICE_TEMPERATURE: f32 = 0.3;
    pub const VOICE_MAX_TOKENS: u32 = 1000;

    /// Chart-image analysis
    pub const CHART_TEMPERATURE: f32 = 0.3;
    pub const CHART_MAX_TOKENS: u32 = 1500;

    /// Trade-setup validation
    pub const VALIDATION_TEMPERATURE: f32 = 0.2;
    pub const VALIDATION_MAX_TOKENS: u32 = 800;

    /// Market commentary (moderate randomness is acceptable for prose)
    pub const COMMENTARY_TEMPERATURE: f32 = 0.4;
    pub const COMMENTARY_MAX_TOKENS: u32 = 300;
}

/// Input validation limits
pub mod limits {
    /// Maximum chart image size accepted for upload (10 MB)
    pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

    /// Accepted chart image media types
    pub const IMAGE_MEDIA_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

    /// Maximum characters accepted for a voice transcript or commentary query
    pub const MAX_TEXT_CHARS: usize = 8192;
}

/// Timeouts (milliseconds)
pub mod timeouts {
    /// Chat-completion request timeout
    pub const LLM_REQUEST_MS: u64 = 60_000;
}

/// Speech defaults
pub mod speech {
    /// Default recognition locale
    pub const DEFAULT_LANG: &str = "en-US";

    /// Neutral synthesis parameters
    pub const DEFAULT_RATE: f32 = 1.0;
    pub const DEFAULT_PITCH: f32 = 1.0;
    pub const DEFAULT_VOLUME: f32 = 1.0;
}

/// Mock market feed defaults
pub mod market {
    /// Default symbol universe for the mock feed
    pub const DEFAULT_SYMBOLS: &[&str] = &["SPY", "QQQ", "AAPL", "TSLA", "NVDA", "BTCUSD"];

    /// Maximum per-tick price perturbation, as a fraction of last price
    pub const MAX_TICK_DRIFT: f64 = 0.005;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_temperatures_below_commentary() {
        assert!(sampling::VOICE_TEMPERATURE <= sampling::COMMENTARY_TEMPERATURE);
        assert!(sampling::CHART_TEMPERATURE <= sampling::COMMENTARY_TEMPERATURE);
        assert!(sampling::VALIDATION_TEMPERATURE <= sampling::COMMENTARY_TEMPERATURE);
    }

    #[test]
    fn test_limits_reasonable() {
        assert_eq!(limits::MAX_IMAGE_BYTES, 10_485_760);
        assert!(limits::IMAGE_MEDIA_TYPES.contains(&"image/png"));
    }

    #[test]
    fn test_tick_drift_is_a_fraction() {
        assert!(market::MAX_TICK_DRIFT > 0.0 && market::MAX_TICK_DRIFT < 1.0);
    }
}
