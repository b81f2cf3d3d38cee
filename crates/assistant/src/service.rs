//! The trading assistant service
//!
//! Explicitly constructed, never a global: the credential comes in through
//! [`Settings`] and the transport is injected behind [`ChatBackend`], so a
//! test can substitute a recording fake. A missing credential produces a
//! constructed-but-not-connected assistant whose status the UI shows as a
//! persistent indicator; every AI entry point then fails fast with a
//! configuration error before any network dispatch.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use trading_copilot_config::Settings;
use trading_copilot_core::{
    ChartAnalysisResult, Error, RecognitionOptions, Result, SynthesisOptions, TradeParams,
    TradeValidationResult, VoiceCommandResult,
};
use trading_copilot_llm::{
    chart_analysis_request, commentary_request, parse_structured, trade_validation_request,
    voice_command_request, ChatBackend, ImageSource, OpenAiBackend, OpenAiConfig,
};
use trading_copilot_speech::SpeechBridge;

use crate::upload::validate_image_source;

/// Connection state toward the AI provider, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected,
    NotConnected { reason: String },
}

impl ConnectionStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected => write!(f, "connected"),
            ConnectionStatus::NotConnected { reason } => write!(f, "not connected: {}", reason),
        }
    }
}

/// Facade over the AI request formatter and transport
pub struct TradingAssistant {
    backend: Option<Arc<dyn ChatBackend>>,
    status: ConnectionStatus,
    max_text_chars: usize,
}

impl TradingAssistant {
    /// Build from loaded settings
    ///
    /// A missing/invalid credential does not fail construction; it yields a
    /// not-connected assistant so the surface can show the status instead of
    /// dying silently.
    pub fn from_settings(settings: &Settings) -> Self {
        let max_text_chars = settings.market.max_text_chars;

        match OpenAiConfig::from_provider(&settings.provider).and_then(OpenAiBackend::new) {
            Ok(backend) => {
                tracing::info!(endpoint = %settings.provider.endpoint, "AI provider connected");
                Self {
                    backend: Some(Arc::new(backend)),
                    status: ConnectionStatus::Connected,
                    max_text_chars,
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "AI provider not connected");
                Self {
                    backend: None,
                    status: ConnectionStatus::NotConnected {
                        reason: err.to_string(),
                    },
                    max_text_chars,
                }
            }
        }
    }

    /// Build with an injected transport (tests, alternative providers)
    pub fn with_backend(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend: Some(backend),
            status: ConnectionStatus::Connected,
            max_text_chars: trading_copilot_config::constants::limits::MAX_TEXT_CHARS,
        }
    }

    /// Current connection status, for the persistent UI indicator
    pub fn connection_status(&self) -> &ConnectionStatus {
        &self.status
    }

    fn backend(&self) -> Result<&Arc<dyn ChatBackend>> {
        match (&self.backend, &self.status) {
            (Some(backend), _) => Ok(backend),
            (None, ConnectionStatus::NotConnected { reason }) => {
                Err(Error::Configuration(reason.clone()))
            }
            (None, ConnectionStatus::Connected) => {
                Err(Error::Configuration("no transport configured".to_string()))
            }
        }
    }

    fn check_text_input(&self, label: &str, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput(format!("{} is empty", label)));
        }
        if text.len() > self.max_text_chars {
            return Err(Error::InvalidInput(format!(
                "{} exceeds {} characters",
                label, self.max_text_chars
            )));
        }
        Ok(())
    }

    /// Interpret one voice transcript as a trading command
    pub async fn process_voice_command(&self, transcript: &str) -> Result<VoiceCommandResult> {
        let backend = self.backend()?;
        self.check_text_input("voice transcript", transcript)?;

        let request = voice_command_request(transcript);
        let contract = request
            .contract
            .clone()
            .ok_or_else(|| Error::SchemaViolation("voice command requires a contract".into()))?;

        let outcome = backend.complete(&request).await.map_err(Error::from)?;
        let result = parse_structured::<VoiceCommandResult>(&outcome.content, &contract)
            .map_err(Error::from)?;

        tracing::debug!(
            confidence = result.confidence,
            action_required = result.action_required,
            "voice command interpreted"
        );
        Ok(result)
    }

    /// Analyze an uploaded or linked chart image
    pub async fn analyze_chart_image(&self, image: &ImageSource) -> Result<ChartAnalysisResult> {
        let backend = self.backend()?;
        validate_image_source(image)?;

        let request = chart_analysis_request(image);
        let contract = request
            .contract
            .clone()
            .ok_or_else(|| Error::SchemaViolation("chart analysis requires a contract".into()))?;

        let outcome = backend.complete(&request).await.map_err(Error::from)?;
        let result = parse_structured::<ChartAnalysisResult>(&outcome.content, &contract)
            .map_err(Error::from)?;

        tracing::debug!(
            symbol = %result.symbol,
            patterns = result.patterns_detected.len(),
            bias = %result.overall_bias,
            "chart analyzed"
        );
        Ok(result)
    }

    /// Validate a proposed trade against current market data
    pub async fn validate_trade_setup<M: Serialize>(
        &self,
        market: &M,
        trade: &TradeParams,
    ) -> Result<TradeValidationResult> {
        let backend = self.backend()?;
        if trade.symbol.trim().is_empty() {
            return Err(Error::InvalidInput("trade symbol is empty".to_string()));
        }

        let request = trade_validation_request(market, trade).map_err(Error::from)?;
        let contract = request
            .contract
            .clone()
            .ok_or_else(|| Error::SchemaViolation("trade validation requires a contract".into()))?;

        let outcome = backend.complete(&request).await.map_err(Error::from)?;
        let result = parse_structured::<TradeValidationResult>(&outcome.content, &contract)
            .map_err(Error::from)?;

        tracing::debug!(
            symbol = %trade.symbol,
            approved = result.approval_status,
            confidence = result.confidence_primary,
            "trade setup validated"
        );
        Ok(result)
    }

    /// Free-text market commentary (no schema contract; raw text back)
    pub async fn market_commentary(&self, query: &str) -> Result<String> {
        let backend = self.backend()?;
        self.check_text_input("commentary query", query)?;

        let request = commentary_request(query);
        let outcome = backend.complete(&request).await.map_err(Error::from)?;
        Ok(outcome.content)
    }

    /// One full voice interaction: capture, interpret, speak the response
    ///
    /// Playback failure is non-fatal: the structured result is still returned
    /// and the failure is only logged, matching how the voice panel treats a
    /// broken speaker as a degraded but usable session.
    pub async fn voice_round_trip(
        &self,
        bridge: &SpeechBridge,
        recognition: &RecognitionOptions,
        synthesis: &SynthesisOptions,
    ) -> Result<VoiceCommandResult> {
        let transcript = bridge.speech_to_text(recognition).await.map_err(Error::from)?;
        let result = self.process_voice_command(&transcript).await?;

        if bridge.synthesis_supported() {
            if let Err(err) = bridge.text_to_speech(&result.response, synthesis).await {
                tracing::warn!(error = %err, "response playback failed");
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_settings_without_key_is_not_connected() {
        let mut settings = Settings::default();
        settings.provider.api_key = None;

        let assistant = TradingAssistant::from_settings(&settings);
        assert!(!assistant.connection_status().is_connected());
        assert!(assistant
            .connection_status()
            .to_string()
            .starts_with("not connected"));
    }

    #[test]
    fn test_from_settings_with_key_connects() {
        let mut settings = Settings::default();
        settings.provider.api_key = Some("sk-test".to_string());

        let assistant = TradingAssistant::from_settings(&settings);
        assert!(assistant.connection_status().is_connected());
    }

    #[tokio::test]
    async fn test_disconnected_calls_fail_with_configuration_error() {
        let mut settings = Settings::default();
        settings.provider.api_key = None;
        let assistant = TradingAssistant::from_settings(&settings);

        let err = assistant
            .process_voice_command("Analyze the current chart")
            .await
            .unwrap_err();
        assert!(err.is_configuration());

        let err = assistant
            .market_commentary("How is tech today?")
            .await
            .unwrap_err();
        assert!(err.is_configuration());
    }
}
