//! Error types shared across the workspace
//!
//! Every failure is scoped to the single user action that triggered it;
//! nothing here is fatal to the process. Crate-level errors (`LlmError`,
//! `SpeechError`, `ConfigError`) convert into this taxonomy at the facade
//! boundary so callers see one consistent set of categories.

use thiserror::Error;

/// Unified error taxonomy for the copilot surface
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid API credential. Detected once at construction and
    /// exposed as a persistent connection status; blocks all AI calls.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Network failure or non-success response from the provider.
    /// Surfaced per call; retry is left to the user.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider response did not parse or validate against the declared
    /// response schema. Never retried automatically.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Host environment lacks a speech capability (recognition or synthesis).
    #[error("Capability not supported: {0}")]
    CapabilityUnsupported(String),

    /// Caller input rejected before any network call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Speech engine reported a failure mid-capture or mid-playback.
    #[error("Speech error: {0}")]
    Speech(String),
}

impl Error {
    /// True when the error means "fix configuration", not "retry the action"
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::Configuration("API key not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: API key not set");
        assert!(err.is_configuration());

        let err = Error::SchemaViolation("missing field `confidence`".to_string());
        assert!(err.to_string().contains("confidence"));
        assert!(!err.is_configuration());
    }
}
