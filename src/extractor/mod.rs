//! Turn free-text setup documentation into a structured plan via an LLM.
//!
//! - [`prompt`]: truncation and the fixed extraction template.
//! - [`parse`]: JSON decoding with code-fence tolerance.
//!
//! [`InstructionExtractor::extract`] reports failures as [`ExtractionError`];
//! [`InstructionExtractor::extract_or_default`] logs them and degrades to an
//! empty [`ExtractionResult`]. Nothing here retries.

pub mod parse;
pub mod prompt;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::llm::{ChatClient, LlmError};
use crate::models::ExtractionResult;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("model request failed: {0}")]
    Transport(#[from] LlmError),

    #[error("model response is not valid extraction JSON: {message}")]
    Parse { message: String, snippet: String },
}

pub struct InstructionExtractor {
    client: Arc<dyn ChatClient>,
    max_chars: usize,
}

impl InstructionExtractor {
    pub fn new(client: Arc<dyn ChatClient>, max_chars: usize) -> Self {
        Self { client, max_chars }
    }

    /// Send the (truncated) documentation to the model and decode its answer.
    ///
    /// Blank documentation short-circuits to an empty result without a request.
    pub async fn extract(&self, documentation: &str) -> Result<ExtractionResult, ExtractionError> {
        if documentation.trim().is_empty() {
            return Ok(ExtractionResult::default());
        }

        let excerpt = prompt::truncate(documentation, self.max_chars);
        if excerpt.len() < documentation.len() {
            debug!(
                max_chars = self.max_chars,
                original_bytes = documentation.len(),
                "documentation truncated"
            );
        }

        let request = prompt::build_prompt(excerpt);
        let raw = self.client.complete(&request).await?;
        debug!(backend = self.client.name(), response_bytes = raw.len(), "model answered");

        parse::parse_response(&raw)
    }

    /// Like [`extract`](Self::extract), but any failure becomes an empty result.
    pub async fn extract_or_default(&self, documentation: &str) -> ExtractionResult {
        match self.extract(documentation).await {
            Ok(result) => result,
            Err(ExtractionError::Transport(e)) => {
                warn!(backend = self.client.name(), error = %e, "instruction extraction unavailable");
                ExtractionResult::default()
            }
            Err(ExtractionError::Parse { message, snippet }) => {
                warn!(%message, response = %snippet, "could not parse instruction extraction");
                ExtractionResult::default()
            }
        }
    }
}
