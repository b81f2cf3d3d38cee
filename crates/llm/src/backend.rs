//! Chat-completion transport
//!
//! One network call per invocation: no caching, no retry, no backoff and no
//! rate-limit handling. A failed call is surfaced to the caller, who decides
//! whether to try again.
//!
//! The [`ChatBackend`] trait is the seam the assistant facade is built
//! against; tests substitute a recording fake, production wires in
//! [`OpenAiBackend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trading_copilot_config::constants::{endpoints, timeouts};
use trading_copilot_config::ProviderConfig;

use crate::prompt::{ChatRequest, Message};
use crate::LlmError;

/// Transport seam for chat completions
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Dispatch one formatted request and return the provider's text content
    async fn complete(&self, request: &ChatRequest) -> Result<ChatOutcome, LlmError>;

    /// Backend name for logging
    fn backend_name(&self) -> &str;
}

/// Raw outcome of one chat completion
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// Text content of the first choice (JSON text when a contract was sent)
    pub content: String,
    /// Model that actually served the request
    pub model: String,
    /// Prompt tokens billed
    pub prompt_tokens: u64,
    /// Completion tokens billed
    pub completion_tokens: u64,
}

/// Configuration for the OpenAI-compatible backend
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API credential, supplied explicitly by the caller
    pub api_key: String,
    /// API base URL (for testing or a proxy)
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Create config with an API key and defaults for everything else
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoints::OPENAI_DEFAULT.to_string(),
            timeout: Duration::from_millis(timeouts::LLM_REQUEST_MS),
        }
    }

    /// Build from loaded provider settings; absence of a credential is a
    /// configuration error the caller turns into a not-connected status
    pub fn from_provider(provider: &ProviderConfig) -> Result<Self, LlmError> {
        let api_key = provider
            .api_key
            .clone()
            .ok_or_else(|| LlmError::Configuration("provider API key is not set".to_string()))?;

        Ok(Self {
            api_key,
            endpoint: provider.endpoint.clone(),
            timeout: Duration::from_millis(provider.timeout_ms),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// OpenAI-compatible chat-completion backend
pub struct OpenAiBackend {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiBackend {
    /// Create a new backend; fails fast on a missing credential
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Configuration(
                "API key is empty. Supply it via configuration.".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Network(e.to_string()))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl ChatBackend for OpenAiBackend {
    async fn complete(&self, request: &ChatRequest) -> Result<ChatOutcome, LlmError> {
        let request_id = Uuid::new_v4();
        let model = request.kind.model_id();

        tracing::debug!(
            %request_id,
            kind = request.kind.as_str(),
            model,
            structured = request.contract.is_some(),
            "dispatching chat completion"
        );

        let wire = WireRequest {
            model,
            messages: &request.messages,
            response_format: request.contract.as_ref().map(|c| c.to_response_format()),
            temperature: request.kind.temperature(),
            max_tokens: request.kind.max_tokens(),
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.endpoint))
            .bearer_auth(&self.config.api_key)
            .json(&wire)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(%request_id, %status, "provider returned non-success status");
            return Err(LlmError::Api(format!("HTTP {}: {}", status, error_text)));
        }

        let api: WireResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        let served_model = api.model.unwrap_or_else(|| model.to_string());
        let usage = api.usage.unwrap_or_default();
        let content = api
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                LlmError::InvalidResponse("response carried no message content".to_string())
            })?;

        tracing::debug!(
            %request_id,
            model = %served_model,
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            "chat completion finished"
        );

        Ok(ChatOutcome {
            content,
            model: served_model,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        })
    }

    fn backend_name(&self) -> &str {
        "openai"
    }
}

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
    #[serde(default)]
    usage: Option<WireUsage>,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{chart_analysis_request, voice_command_request, ImageSource};

    #[test]
    fn test_config_builder() {
        let config = OpenAiConfig::new("test-key")
            .with_endpoint("http://localhost:9099/v1")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.endpoint, "http://localhost:9099/v1");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_missing_credential_is_configuration_error() {
        let provider = ProviderConfig {
            api_key: None,
            ..ProviderConfig::default()
        };
        assert!(matches!(
            OpenAiConfig::from_provider(&provider),
            Err(LlmError::Configuration(_))
        ));

        assert!(matches!(
            OpenAiBackend::new(OpenAiConfig::new("")),
            Err(LlmError::Configuration(_))
        ));
    }

    #[test]
    fn test_request_serialization() {
        let request = voice_command_request("Show me SPY");
        let wire = WireRequest {
            model: request.kind.model_id(),
            messages: &request.messages,
            response_format: request.contract.as_ref().map(|c| c.to_response_format()),
            temperature: request.kind.temperature(),
            max_tokens: request.kind.max_tokens(),
        };

        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains("gpt-4o"));
        assert!(json.contains("Show me SPY"));
        assert!(json.contains("json_schema"));
        assert!(json.contains("trading_voice_response"));
        assert!(json.contains("\"max_tokens\":1000"));
    }

    #[test]
    fn test_commentary_request_has_no_response_format() {
        let request = crate::prompt::commentary_request("How is tech today?");
        let wire = WireRequest {
            model: request.kind.model_id(),
            messages: &request.messages,
            response_format: None,
            temperature: request.kind.temperature(),
            max_tokens: request.kind.max_tokens(),
        };

        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains("gpt-4.1"));
        assert!(!json.contains("response_format"));
    }

    #[test]
    fn test_image_message_wire_format() {
        let request = chart_analysis_request(&ImageSource::Url("https://t.test/c.png".into()));
        let json = serde_json::to_string(&request.messages[1]).unwrap();

        assert!(json.contains("\"type\":\"text\""));
        assert!(json.contains("\"type\":\"image_url\""));
        assert!(json.contains("https://t.test/c.png"));
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "id": "chatcmpl-1",
            "model": "gpt-4o-2024-08-06",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "{\"ok\":true}"}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 120, "completion_tokens": 16, "total_tokens": 136}
        }"#;

        let parsed: WireResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("{\"ok\":true}")
        );
        assert_eq!(parsed.usage.unwrap().prompt_tokens, 120);
    }

    #[test]
    fn test_response_without_content() {
        let json = r#"{"choices": [{"message": {"role": "assistant"}}]}"#;
        let parsed: WireResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
