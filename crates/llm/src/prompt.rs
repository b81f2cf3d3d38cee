//! Prompt building for the trading assistant
//!
//! Every request kind produces exactly one system message followed by exactly
//! one user message; chart analysis adds one image attachment segment to the
//! user message. Construction is pure: the same input yields byte-identical
//! messages and contracts, with no timestamps or counters in the payload.

use serde::{Deserialize, Serialize};
use std::fmt;

use trading_copilot_config::constants::{models, sampling};

use crate::schema::{
    chart_analysis_contract, trade_validation_contract, voice_command_contract, ResponseContract,
};
use crate::LlmError;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

/// Message content: plain text, or segments when an attachment is present
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Segments(Vec<ContentSegment>),
}

/// One segment of a multimodal user message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentSegment {
    Text { text: String },
    ImageUrl { image_url: ImageUrlRef },
}

/// Image reference in provider wire format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrlRef {
    pub url: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: MessageContent::Text(content.into()),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Text(content.into()),
        }
    }

    /// User message carrying a text instruction plus one image attachment
    pub fn user_with_image(text: impl Into<String>, image: &ImageSource) -> Self {
        Self {
            role: Role::User,
            content: MessageContent::Segments(vec![
                ContentSegment::Text { text: text.into() },
                ContentSegment::ImageUrl {
                    image_url: ImageUrlRef {
                        url: image.as_url(),
                    },
                },
            ]),
        }
    }

    /// Flattened text of the message, for logging and assertions
    pub fn text(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Segments(segments) => segments
                .iter()
                .filter_map(|s| match s {
                    ContentSegment::Text { text } => Some(text.as_str()),
                    ContentSegment::ImageUrl { .. } => None,
                })
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Caller-side image reference: a URL or inline base64 data
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Url(String),
    Base64 { media_type: String, data: String },
}

impl ImageSource {
    /// Provider-resolvable URL form (data URL for inline images)
    pub fn as_url(&self) -> String {
        match self {
            ImageSource::Url(url) => url.clone(),
            ImageSource::Base64 { media_type, data } => {
                format!("data:{};base64,{}", media_type, data)
            }
        }
    }
}

/// The four request kinds the formatter knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    VoiceCommand,
    ChartAnalysis,
    TradeValidation,
    Commentary,
}

impl RequestKind {
    /// Model identifier for this kind: the multimodal model for anything
    /// structured, the faster text model for commentary
    pub fn model_id(&self) -> &'static str {
        match self {
            RequestKind::VoiceCommand
            | RequestKind::ChartAnalysis
            | RequestKind::TradeValidation => models::ANALYSIS,
            RequestKind::Commentary => models::COMMENTARY,
        }
    }

    pub fn temperature(&self) -> f32 {
        match self {
            RequestKind::VoiceCommand => sampling::VOICE_TEMPERATURE,
            RequestKind::ChartAnalysis => sampling::CHART_TEMPERATURE,
            RequestKind::TradeValidation => sampling::VALIDATION_TEMPERATURE,
            RequestKind::Commentary => sampling::COMMENTARY_TEMPERATURE,
        }
    }

    pub fn max_tokens(&self) -> u32 {
        match self {
            RequestKind::VoiceCommand => sampling::VOICE_MAX_TOKENS,
            RequestKind::ChartAnalysis => sampling::CHART_MAX_TOKENS,
            RequestKind::TradeValidation => sampling::VALIDATION_MAX_TOKENS,
            RequestKind::Commentary => sampling::COMMENTARY_MAX_TOKENS,
        }
    }

    /// Stable name for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestKind::VoiceCommand => "voice_command",
            RequestKind::ChartAnalysis => "chart_analysis",
            RequestKind::TradeValidation => "trade_validation",
            RequestKind::Commentary => "commentary",
        }
    }
}

/// A fully formatted request, ready for transport dispatch
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub kind: RequestKind,
    pub messages: Vec<Message>,
    /// Response shape contract; `None` for free-text commentary
    pub contract: Option<ResponseContract>,
}

/// System instruction shared by voice-command and trade-validation requests
const TRADING_SYSTEM_PROMPT: &str = r#"You are an expert trading AI assistant with deep knowledge of technical analysis, market patterns, and risk management.

Your capabilities include:
- Analyzing trading charts and identifying patterns
- Providing confidence-based trading recommendations
- Explaining technical analysis in clear, actionable terms
- Calculating risk/reward ratios and position sizing
- Monitoring market conditions and providing real-time insights

Always provide structured responses with confidence scores and clear reasoning. Be conservative with risk and always emphasize proper risk management principles."#;

/// System instruction for chart-image analysis
const CHART_ANALYST_PROMPT: &str = r#"You are an expert technical analyst. Analyze trading charts and identify:
- Chart patterns (engulfing, doji, hammer, etc.)
- Support/resistance levels
- Trend direction and strength
- Technical indicators (VWAP, EMA, RSI if visible)
- Trading opportunities with confidence scores

Provide structured analysis with specific entry/exit levels and risk management recommendations."#;

/// System instruction for free-text market commentary
const COMMENTARY_PROMPT: &str = "You are a professional trading analyst providing real-time market commentary. Be concise, accurate, and actionable. Focus on current market conditions and trading opportunities.";

/// Build the voice-command interpretation request
pub fn voice_command_request(transcript: &str) -> ChatRequest {
    ChatRequest {
        kind: RequestKind::VoiceCommand,
        messages: vec![
            Message::system(TRADING_SYSTEM_PROMPT),
            Message::user(format!(
                "Voice command: \"{}\". Provide a trading assistant response.",
                transcript
            )),
        ],
        contract: Some(voice_command_contract()),
    }
}

/// Build the chart-image analysis request
pub fn chart_analysis_request(image: &ImageSource) -> ChatRequest {
    ChatRequest {
        kind: RequestKind::ChartAnalysis,
        messages: vec![
            Message::system(CHART_ANALYST_PROMPT),
            Message::user_with_image(
                "Analyze this trading chart and provide detailed technical analysis with trading recommendations.",
                image,
            ),
        ],
        contract: Some(chart_analysis_contract()),
    }
}

/// Build the trade-setup validation request
///
/// Market and trade payloads are arbitrary serializable objects; they are
/// embedded into the user message as JSON.
pub fn trade_validation_request<M, T>(market: &M, trade: &T) -> Result<ChatRequest, LlmError>
where
    M: Serialize,
    T: Serialize,
{
    let market_json = serde_json::to_string(market)
        .map_err(|e| LlmError::InvalidRequest(format!("market data not serializable: {}", e)))?;
    let trade_json = serde_json::to_string(trade)
        .map_err(|e| LlmError::InvalidRequest(format!("trade params not serializable: {}", e)))?;

    Ok(ChatRequest {
        kind: RequestKind::TradeValidation,
        messages: vec![
            Message::system(TRADING_SYSTEM_PROMPT),
            Message::user(format!(
                "Validate this trade setup:\n\nMarket Data: {}\nTrade Parameters: {}\n\nProvide detailed validation with confidence scores and risk assessment.",
                market_json, trade_json
            )),
        ],
        contract: Some(trade_validation_contract()),
    })
}

/// Build the free-text market commentary request (no contract)
pub fn commentary_request(query: &str) -> ChatRequest {
    ChatRequest {
        kind: RequestKind::Commentary,
        messages: vec![
            Message::system(COMMENTARY_PROMPT),
            Message::user(query),
        ],
        contract: None,
    }
}
