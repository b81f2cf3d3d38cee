//! Speech bridge for the trading copilot
//!
//! Wraps whatever recognition/synthesis capability the host environment
//! provides behind two promise-style calls: capture spoken input as text,
//! and render text as spoken audio. The capabilities themselves are injected
//! ([`trading_copilot_core::Capability`]), so the bridge runs identically
//! against a browser engine, a native engine or a scripted test double.

pub mod bridge;

pub use bridge::{CallState, SpeechBridge};

use thiserror::Error;

/// Speech bridge errors
#[derive(Error, Debug)]
pub enum SpeechError {
    /// The host provides no engine for this capability. Surfaced once per
    /// session; the embedding surface disables the affected control.
    #[error("Speech {capability} is not supported in this environment: {reason}")]
    NotSupported {
        capability: &'static str,
        reason: String,
    },

    /// The recognition engine reported an error mid-capture
    #[error("Recognition failed: {0}")]
    Recognition(String),

    /// The synthesis engine reported an error during playback
    #[error("Playback failed: {0}")]
    Playback(String),
}

impl From<SpeechError> for trading_copilot_core::Error {
    fn from(err: SpeechError) -> Self {
        use trading_copilot_core::Error;
        match err {
            SpeechError::NotSupported { .. } => Error::CapabilityUnsupported(err.to_string()),
            SpeechError::Recognition(msg) | SpeechError::Playback(msg) => Error::Speech(msg),
        }
    }
}
