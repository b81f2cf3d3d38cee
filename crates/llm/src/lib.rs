//! Prompt construction and chat-completion transport
//!
//! Two halves, kept deliberately separate:
//! - `prompt` builds role-structured messages and schema contracts for the
//!   four request kinds. Pure construction, byte-deterministic.
//! - `backend` sends a formatted request to a hosted chat-completion endpoint
//!   behind the [`ChatBackend`] trait and parses what comes back, enforcing
//!   the declared contract when one was supplied.

pub mod backend;
pub mod prompt;
pub mod schema;

pub use backend::{ChatBackend, ChatOutcome, OpenAiBackend, OpenAiConfig};
pub use prompt::{
    chart_analysis_request, commentary_request, trade_validation_request, voice_command_request,
    ChatRequest, ContentSegment, ImageSource, Message, MessageContent, RequestKind, Role,
};
pub use schema::{parse_structured, ResponseContract};

use thiserror::Error;

/// LLM errors
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Schema violation: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::Network(err.to_string())
    }
}

impl From<LlmError> for trading_copilot_core::Error {
    fn from(err: LlmError) -> Self {
        use trading_copilot_core::Error;
        match err {
            LlmError::Api(msg) | LlmError::Network(msg) | LlmError::InvalidResponse(msg) => {
                Error::Transport(msg)
            }
            LlmError::Schema(msg) => Error::SchemaViolation(msg),
            LlmError::Configuration(msg) => Error::Configuration(msg),
            LlmError::InvalidRequest(msg) => Error::InvalidInput(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_into_core_taxonomy() {
        use trading_copilot_core::Error;

        assert!(matches!(
            Error::from(LlmError::Api("HTTP 500".into())),
            Error::Transport(_)
        ));
        assert!(matches!(
            Error::from(LlmError::Schema("missing field".into())),
            Error::SchemaViolation(_)
        ));
        assert!(matches!(
            Error::from(LlmError::Configuration("no key".into())),
            Error::Configuration(_)
        ));
        assert!(matches!(
            Error::from(LlmError::InvalidRequest("empty input".into())),
            Error::InvalidInput(_)
        ));
    }
}
