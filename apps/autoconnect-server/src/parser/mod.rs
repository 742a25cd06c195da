//! Bill parsing
//!
//! Turns recognized OCR lines into a structured bill object with the help
//! of a language model. The shape of the returned object is owned by the
//! prompt, so it is passed through as plain JSON.

mod ollama;

use async_trait::async_trait;
use serde_json::Value;

pub use ollama::OllamaBillParser;

/// Instruction sent ahead of the recognized lines
pub const BILL_PROMPT: &str = "You are given the text lines of a scanned vehicle service bill. \
Return a single JSON object with the fields: issuer, billNumber, date, vehicleNumber, \
items (array of {description, quantity, unitPrice, amount}), subtotal, tax and total. \
Use null for anything that is not present. Return only the JSON object.";

#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("LLM API error: {0}")]
    Api(String),

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),

    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Language-model collaborator producing a structured bill
#[async_trait]
pub trait BillParser: Send + Sync {
    async fn parse(&self, lines: &[String], prompt: &str) -> Result<Value, ParserError>;
}

/// Decode model output as JSON, unwrapping a fenced code block if present
pub(crate) fn decode_structured(text: &str) -> Result<Value, ParserError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
        .map(|fenced| fenced.trim_start_matches("json").trim())
        .unwrap_or(trimmed);

    serde_json::from_str(body).map_err(|e| ParserError::InvalidResponse(e.to_string()))
}
