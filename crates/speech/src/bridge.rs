//! The speech bridge
//!
//! Each call runs a fresh one-shot state machine:
//! Idle -> Capturing/Speaking -> (Completed | Failed). No session state
//! survives between calls. The bridge does not serialize overlapping calls;
//! the embedding UI prevents the overlap by disabling its controls while a
//! capture or playback is pending.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use trading_copilot_core::{
    Capability, RecognitionEngine, RecognitionOptions, SynthesisEngine, SynthesisOptions,
};

use crate::SpeechError;

/// Observable state of the most recent call on each side of the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CallState {
    #[default]
    Idle,
    Capturing,
    Speaking,
    Completed,
    Failed,
}

/// Promise-style wrapper over the host speech capabilities
pub struct SpeechBridge {
    recognizer: Capability<Arc<dyn RecognitionEngine>>,
    synthesizer: Capability<Arc<dyn SynthesisEngine>>,
    capture_state: Mutex<CallState>,
    playback_state: Mutex<CallState>,
}

impl SpeechBridge {
    /// Build a bridge from capabilities resolved once at startup
    pub fn new(
        recognizer: Capability<Arc<dyn RecognitionEngine>>,
        synthesizer: Capability<Arc<dyn SynthesisEngine>>,
    ) -> Self {
        if !recognizer.is_available() {
            tracing::warn!("speech recognition unavailable; capture control should be disabled");
        }
        if !synthesizer.is_available() {
            tracing::warn!("speech synthesis unavailable; playback control should be disabled");
        }

        Self {
            recognizer,
            synthesizer,
            capture_state: Mutex::new(CallState::Idle),
            playback_state: Mutex::new(CallState::Idle),
        }
    }

    /// True when a recognition engine was injected
    pub fn recognition_supported(&self) -> bool {
        self.recognizer.is_available()
    }

    /// True when a synthesis engine was injected
    pub fn synthesis_supported(&self) -> bool {
        self.synthesizer.is_available()
    }

    /// State of the most recent capture call
    pub fn capture_state(&self) -> CallState {
        *self.capture_state.lock()
    }

    /// State of the most recent playback call
    pub fn playback_state(&self) -> CallState {
        *self.playback_state.lock()
    }

    /// Capture spoken input and resolve with the final transcript
    pub async fn speech_to_text(
        &self,
        options: &RecognitionOptions,
    ) -> Result<String, SpeechError> {
        self.capture(options, None).await
    }

    /// Capture spoken input, emitting partial transcripts on `interim_tx`
    /// while recognition is in flight
    pub async fn speech_to_text_with_interim(
        &self,
        options: &RecognitionOptions,
        interim_tx: mpsc::Sender<String>,
    ) -> Result<String, SpeechError> {
        self.capture(options, Some(interim_tx)).await
    }

    async fn capture(
        &self,
        options: &RecognitionOptions,
        interim: Option<mpsc::Sender<String>>,
    ) -> Result<String, SpeechError> {
        let engine = match &self.recognizer {
            Capability::Available(engine) => Arc::clone(engine),
            Capability::Unavailable { reason } => {
                return Err(SpeechError::NotSupported {
                    capability: "recognition",
                    reason: reason.clone(),
                });
            }
        };

        *self.capture_state.lock() = CallState::Capturing;
        tracing::debug!(
            engine = engine.engine_name(),
            lang = %options.lang,
            continuous = options.continuous,
            "starting speech capture"
        );

        let interim = if options.interim_results { interim } else { None };
        match engine.recognize(options, interim).await {
            Ok(transcript) => {
                *self.capture_state.lock() = CallState::Completed;
                tracing::debug!(chars = transcript.len(), "speech capture completed");
                Ok(transcript)
            }
            Err(err) => {
                *self.capture_state.lock() = CallState::Failed;
                Err(SpeechError::Recognition(err.to_string()))
            }
        }
    }

    /// Render text as spoken audio; resolves when playback completes
    pub async fn text_to_speech(
        &self,
        text: &str,
        options: &SynthesisOptions,
    ) -> Result<(), SpeechError> {
        let engine = match &self.synthesizer {
            Capability::Available(engine) => Arc::clone(engine),
            Capability::Unavailable { reason } => {
                return Err(SpeechError::NotSupported {
                    capability: "synthesis",
                    reason: reason.clone(),
                });
            }
        };

        *self.playback_state.lock() = CallState::Speaking;
        tracing::debug!(
            engine = engine.engine_name(),
            chars = text.len(),
            rate = options.rate,
            "starting speech playback"
        );

        match engine.speak(text, options).await {
            Ok(()) => {
                *self.playback_state.lock() = CallState::Completed;
                Ok(())
            }
            Err(err) => {
                *self.playback_state.lock() = CallState::Failed;
                Err(SpeechError::Playback(err.to_string()))
            }
        }
    }
}
