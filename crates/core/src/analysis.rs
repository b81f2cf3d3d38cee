//! Analysis result DTOs returned by the AI service
//!
//! Each type mirrors the JSON-schema response contract declared for its
//! request kind. `deny_unknown_fields` enforces the additional-properties
//! half of the contract locally: a payload carrying keys outside the schema
//! fails deserialization instead of being silently accepted.
//!
//! All of these are ephemeral and request-scoped. They are handed to the
//! caller for display and then dropped; nothing is persisted.

use serde::{Deserialize, Serialize};

/// Structured response to an interpreted voice command
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceCommandResult {
    /// Natural-language assistant response, suitable for display or synthesis
    pub response: String,
    /// Confidence score in 0-100
    pub confidence: f64,
    /// Whether the command requires a follow-up trading action
    pub action_required: bool,
    /// Present when the command resolved to a concrete trade idea
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_recommendation: Option<TradeRecommendation>,
    /// Present when the command asked about market conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_analysis: Option<MarketAnalysis>,
}

/// Concrete trade idea embedded in a voice-command response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TradeRecommendation {
    pub symbol: String,
    pub direction: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: Vec<f64>,
    pub risk_reward_ratio: f64,
}

/// Qualitative market state summary
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketAnalysis {
    pub trend: String,
    pub volatility: String,
    pub sentiment: String,
}

/// Structured response to a chart-image analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartAnalysisResult {
    pub symbol: String,
    pub timeframe: String,
    pub trend_direction: String,
    pub patterns_detected: Vec<ChartPattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub support_resistance: Option<SupportResistance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_setup: Option<TradeSetup>,
    pub overall_bias: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_assessment: Option<String>,
}

/// A single pattern identified on the chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChartPattern {
    pub name: String,
    pub confidence: f64,
    pub description: String,
    pub bullish: bool,
}

/// Price levels read off the chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportResistance {
    pub support_levels: Vec<f64>,
    pub resistance_levels: Vec<f64>,
}

/// Entry/exit plan derived from the chart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TradeSetup {
    pub setup_type: String,
    pub entry_zone: f64,
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub risk_reward: f64,
    pub confidence: f64,
}

/// Structured response to a trade-setup validation request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TradeValidationResult {
    pub validation_result: String,
    /// Confidence in the proposed direction, 0-100
    pub confidence_primary: f64,
    /// Confidence in the opposite thesis, 0-100
    pub confidence_opposite: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_position_size: Option<f64>,
    #[serde(default)]
    pub key_factors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    pub approval_status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_result_conforming_fixture() {
        let json = r#"{
            "response": "AAPL is in an uptrend",
            "confidence": 82.5,
            "action_required": false,
            "market_analysis": {"trend": "bullish", "volatility": "moderate", "sentiment": "positive"}
        }"#;

        let parsed: VoiceCommandResult = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.confidence, 82.5);
        assert!(!parsed.action_required);
        assert!(parsed.trade_recommendation.is_none());
        assert_eq!(parsed.market_analysis.unwrap().trend, "bullish");
    }

    #[test]
    fn test_voice_result_missing_required_field_fails() {
        // No `confidence`: must fail, never default
        let json = r#"{"response": "ok", "action_required": true}"#;
        assert!(serde_json::from_str::<VoiceCommandResult>(json).is_err());
    }

    #[test]
    fn test_voice_result_unknown_field_fails() {
        let json = r#"{
            "response": "ok",
            "confidence": 50,
            "action_required": false,
            "extra": "not in schema"
        }"#;
        assert!(serde_json::from_str::<VoiceCommandResult>(json).is_err());
    }

    #[test]
    fn test_chart_result_round_trip() {
        let result = ChartAnalysisResult {
            symbol: "BTCUSD".to_string(),
            timeframe: "4h".to_string(),
            trend_direction: "up".to_string(),
            patterns_detected: vec![ChartPattern {
                name: "bullish engulfing".to_string(),
                confidence: 74.0,
                description: "Strong reversal candle at support".to_string(),
                bullish: true,
            }],
            support_resistance: Some(SupportResistance {
                support_levels: vec![61200.0, 60550.0],
                resistance_levels: vec![63800.0],
            }),
            trade_setup: None,
            overall_bias: "bullish".to_string(),
            risk_assessment: Some("moderate".to_string()),
        };

        let json = serde_json::to_string(&result).unwrap();
        let back: ChartAnalysisResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.patterns_detected.len(), 1);
        assert!(back.patterns_detected[0].bullish);
    }

    #[test]
    fn test_validation_result_defaults_for_optional_lists() {
        let json = r#"{
            "validation_result": "acceptable",
            "confidence_primary": 68.0,
            "confidence_opposite": 22.0,
            "approval_status": true
        }"#;

        let parsed: TradeValidationResult = serde_json::from_str(json).unwrap();
        assert!(parsed.approval_status);
        assert!(parsed.key_factors.is_empty());
        assert!(parsed.warnings.is_empty());
        assert!(parsed.risk_level.is_none());
    }
}
