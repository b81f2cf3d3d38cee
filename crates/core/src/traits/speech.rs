//! Speech capability traits
//!
//! Recognition and synthesis are host capabilities, not something this
//! workspace implements: in a browser embedding they map to the native
//! speech APIs, in tests they map to scripted engines. Both are resolved
//! once at startup into a [`Capability`] and passed down, so nothing here
//! reaches for ambient globals.

use crate::{Error, Result};
use async_trait::async_trait;
use tokio::sync::mpsc;

/// A host capability resolved once at startup
///
/// `Unavailable` carries a human-readable reason ("no recognition engine in
/// this environment") that the embedding surface shows when disabling the
/// corresponding control.
#[derive(Debug, Clone)]
pub enum Capability<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Capability<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    /// Borrow the handle, or fail with `CapabilityUnsupported`
    pub fn get(&self) -> Result<&T> {
        match self {
            Capability::Available(inner) => Ok(inner),
            Capability::Unavailable { reason } => {
                Err(Error::CapabilityUnsupported(reason.clone()))
            }
        }
    }
}

/// Options for one recognition session
#[derive(Debug, Clone)]
pub struct RecognitionOptions {
    /// Keep listening across utterances instead of stopping at the first
    pub continuous: bool,
    /// Emit partial transcripts while recognition is in flight
    pub interim_results: bool,
    /// Recognition locale, e.g. "en-US"
    pub lang: String,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            continuous: false,
            interim_results: true,
            lang: "en-US".to_string(),
        }
    }
}

/// Options for one synthesis playback
#[derive(Debug, Clone)]
pub struct SynthesisOptions {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// Speech-to-text engine provided by the host
///
/// One call is one capture session: the future resolves with the final
/// transcript once the engine reports the end of recognition. Partial
/// transcripts, when requested, are sent on `interim` as they arrive.
#[async_trait]
pub trait RecognitionEngine: Send + Sync + 'static {
    async fn recognize(
        &self,
        options: &RecognitionOptions,
        interim: Option<mpsc::Sender<String>>,
    ) -> Result<String>;

    /// Engine name for logging
    fn engine_name(&self) -> &str;
}

/// Text-to-speech engine provided by the host
///
/// The future resolves when playback has finished, not when it has started.
#[async_trait]
pub trait SynthesisEngine: Send + Sync + 'static {
    async fn speak(&self, text: &str, options: &SynthesisOptions) -> Result<()>;

    /// Engine name for logging
    fn engine_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRecognizer;

    #[async_trait]
    impl RecognitionEngine for MockRecognizer {
        async fn recognize(
            &self,
            _options: &RecognitionOptions,
            interim: Option<mpsc::Sender<String>>,
        ) -> Result<String> {
            if let Some(tx) = interim {
                let _ = tx.send("Analyze".to_string()).await;
            }
            Ok("Analyze the current chart".to_string())
        }

        fn engine_name(&self) -> &str {
            "mock-recognizer"
        }
    }

    #[tokio::test]
    async fn test_mock_engine_resolves_transcript() {
        let engine = MockRecognizer;
        let transcript = engine
            .recognize(&RecognitionOptions::default(), None)
            .await
            .unwrap();
        assert_eq!(transcript, "Analyze the current chart");
    }

    #[test]
    fn test_capability_get() {
        let available: Capability<u32> = Capability::Available(7);
        assert_eq!(*available.get().unwrap(), 7);

        let missing: Capability<u32> = Capability::unavailable("no engine");
        assert!(!missing.is_available());
        match missing.get() {
            Err(Error::CapabilityUnsupported(reason)) => assert_eq!(reason, "no engine"),
            other => panic!("unexpected: {:?}", other.err()),
        }
    }

    #[test]
    fn test_option_defaults_match_host_conventions() {
        let rec = RecognitionOptions::default();
        assert!(!rec.continuous);
        assert!(rec.interim_results);
        assert_eq!(rec.lang, "en-US");

        let syn = SynthesisOptions::default();
        assert_eq!(syn.rate, 1.0);
        assert_eq!(syn.pitch, 1.0);
        assert_eq!(syn.volume, 1.0);
    }
}
