//! Decode the model's answer into an [`ExtractionResult`].
//!
//! Two attempts, in order:
//! 1. the raw text as JSON;
//! 2. the text with one leading code fence (three backticks plus an optional
//!    language tag) and one trailing fence removed by regular expression.
//!
//! This is a tolerance rule for the common "```json ... ```" wrapping, not a
//! general JSON-in-markdown parser.

use regex::Regex;

use super::ExtractionError;
use crate::models::ExtractionResult;

const LEADING_FENCE: &str = r"^\s*```[A-Za-z0-9_+.-]*[ \t]*\r?\n?";
const TRAILING_FENCE: &str = r"\r?\n?```\s*$";

pub fn parse_response(raw: &str) -> Result<ExtractionResult, ExtractionError> {
    let first_err = match serde_json::from_str::<ExtractionResult>(raw) {
        Ok(result) => return Ok(result),
        Err(e) => e,
    };

    let stripped = strip_fences(raw)?;
    serde_json::from_str::<ExtractionResult>(stripped.trim()).map_err(|e| {
        ExtractionError::Parse {
            message: format!("{} (unfenced attempt: {})", e, first_err),
            snippet: raw.chars().take(200).collect(),
        }
    })
}

fn strip_fences(raw: &str) -> Result<String, ExtractionError> {
    let leading = Regex::new(LEADING_FENCE).map_err(pattern_error)?;
    let trailing = Regex::new(TRAILING_FENCE).map_err(pattern_error)?;

    let without_leading = leading.replace(raw, "");
    Ok(trailing.replace(&without_leading, "").into_owned())
}

fn pattern_error(e: regex::Error) -> ExtractionError {
    ExtractionError::Parse {
        message: format!("invalid fence pattern: {}", e),
        snippet: String::new(),
    }
}
