//! Response shape contracts for structured request kinds
//!
//! A contract is the JSON schema the provider is instructed to conform its
//! output to, plus the name the provider wire format requires. The same
//! schema is used twice: once serialized into the outgoing request, and once
//! locally after parsing, so a payload that is valid JSON but structurally
//! wrong never reaches the caller.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::LlmError;

/// A named, strict response schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseContract {
    pub name: &'static str,
    pub schema: Value,
}

impl ResponseContract {
    /// Top-level `required` field names declared by the schema
    pub fn required_fields(&self) -> Vec<&str> {
        self.schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|arr| arr.iter().filter_map(|v| v.as_str()).collect())
            .unwrap_or_default()
    }

    /// Provider wire form: `response_format: { type: json_schema, ... }`
    pub fn to_response_format(&self) -> Value {
        json!({
            "type": "json_schema",
            "json_schema": {
                "name": self.name,
                "schema": self.schema,
            },
        })
    }

    /// Structural validation of a parsed payload against this contract
    pub fn validate(&self, instance: &Value) -> Result<(), LlmError> {
        let compiled = jsonschema::JSONSchema::compile(&self.schema)
            .map_err(|e| LlmError::Schema(format!("contract '{}' is invalid: {}", self.name, e)))?;

        if let Err(errors) = compiled.validate(instance) {
            let details: Vec<String> = errors.map(|e| e.to_string()).collect();
            return Err(LlmError::Schema(format!(
                "response does not conform to '{}': {}",
                self.name,
                details.join("; ")
            )));
        }
        Ok(())
    }
}

/// Parse a provider text payload into `T`, enforcing the declared contract
///
/// Failure at any step is a schema violation for this call: it is surfaced
/// with a descriptive message and the raw payload logged, never retried and
/// never silently defaulted.
pub fn parse_structured<T: DeserializeOwned>(
    raw: &str,
    contract: &ResponseContract,
) -> Result<T, LlmError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| {
        tracing::warn!(contract = contract.name, raw_payload = raw, "response is not valid JSON");
        LlmError::Schema(format!("response is not valid JSON: {}", e))
    })?;

    contract.validate(&value).map_err(|e| {
        tracing::warn!(contract = contract.name, raw_payload = raw, "response failed schema validation");
        e
    })?;

    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(contract = contract.name, raw_payload = raw, "response failed deserialization");
        LlmError::Schema(format!("response does not match expected structure: {}", e))
    })
}

/// Contract for voice-command interpretation
pub fn voice_command_contract() -> ResponseContract {
    ResponseContract {
        name: "trading_voice_response",
        schema: json!({
            "type": "object",
            "properties": {
                "response": { "type": "string" },
                "confidence": { "type": "number" },
                "action_required": { "type": "boolean" },
                "trade_recommendation": {
                    "type": "object",
                    "properties": {
                        "symbol": { "type": "string" },
                        "direction": { "type": "string" },
                        "entry_price": { "type": "number" },
                        "stop_loss": { "type": "number" },
                        "take_profit": { "type": "array", "items": { "type": "number" } },
                        "risk_reward_ratio": { "type": "number" }
                    }
                },
                "market_analysis": {
                    "type": "object",
                    "properties": {
                        "trend": { "type": "string" },
                        "volatility": { "type": "string" },
                        "sentiment": { "type": "string" }
                    }
                }
            },
            "required": ["response", "confidence", "action_required"],
            "additionalProperties": false,
        }),
    }
}

/// Contract for chart-image analysis
pub fn chart_analysis_contract() -> ResponseContract {
    ResponseContract {
        name: "chart_analysis_response",
        schema: json!({
            "type": "object",
            "properties": {
                "symbol": { "type": "string" },
                "timeframe": { "type": "string" },
                "trend_direction": { "type": "string" },
                "patterns_detected": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "name": { "type": "string" },
                            "confidence": { "type": "number" },
                            "description": { "type": "string" },
                            "bullish": { "type": "boolean" }
                        }
                    }
                },
                "support_resistance": {
                    "type": "object",
                    "properties": {
                        "support_levels": { "type": "array", "items": { "type": "number" } },
                        "resistance_levels": { "type": "array", "items": { "type": "number" } }
                    }
                },
                "trade_setup": {
                    "type": "object",
                    "properties": {
                        "setup_type": { "type": "string" },
                        "entry_zone": { "type": "number" },
                        "stop_loss": { "type": "number" },
                        "take_profit_1": { "type": "number" },
                        "take_profit_2": { "type": "number" },
                        "risk_reward": { "type": "number" },
                        "confidence": { "type": "number" }
                    }
                },
                "overall_bias": { "type": "string" },
                "risk_assessment": { "type": "string" }
            },
            "required": ["symbol", "timeframe", "trend_direction", "patterns_detected", "overall_bias"],
            "additionalProperties": false,
        }),
    }
}

/// Contract for trade-setup validation
pub fn trade_validation_contract() -> ResponseContract {
    ResponseContract {
        name: "trade_validation_response",
        schema: json!({
            "type": "object",
            "properties": {
                "validation_result": { "type": "string" },
                "confidence_primary": { "type": "number" },
                "confidence_opposite": { "type": "number" },
                "risk_level": { "type": "string" },
                "recommended_position_size": { "type": "number" },
                "key_factors": { "type": "array", "items": { "type": "string" } },
                "warnings": { "type": "array", "items": { "type": "string" } },
                "approval_status": { "type": "boolean" },
                "reasoning": { "type": "string" }
            },
            "required": ["validation_result", "confidence_primary", "confidence_opposite", "approval_status"],
            "additionalProperties": false,
        }),
    }
}
