//! Chat-completion backends used by the instruction extractor.
//!
//! The extractor only needs "send one prompt, get text back", so backends
//! implement [`ChatClient`] and report failures as [`LlmError`].

pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use openai::OpenAiCompatClient;

/// Failures talking to the model endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API key not set (expected in ${0})")]
    MissingApiKey(String),

    #[error("request timed out after {0} seconds")]
    Timeout(u64),

    #[error("network error: {0}")]
    Network(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("rate limit exceeded{}", .retry_after.map(|s| format!(", retry after {s} seconds")).unwrap_or_default())]
    RateLimited { retry_after: Option<u64> },

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid response from model: {0}")]
    InvalidResponse(String),
}

/// A single-turn chat completion backend.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Submit `prompt` as one user message and return the model's text answer.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LlmError::RateLimited {
                retry_after: Some(12)
            }
            .to_string(),
            "rate limit exceeded, retry after 12 seconds"
        );
        assert_eq!(
            LlmError::RateLimited { retry_after: None }.to_string(),
            "rate limit exceeded"
        );
        assert_eq!(
            LlmError::MissingApiKey("GROQ_API_KEY".into()).to_string(),
            "API key not set (expected in $GROQ_API_KEY)"
        );
    }
}
