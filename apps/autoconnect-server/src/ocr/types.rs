//! OCR Types
//!
//! Wire types for the asynchronous Read operation and the error set
//! surfaced by the polling client.

use std::fmt;

use serde::Deserialize;

/// Opaque reference to a submitted Read job (the `Operation-Location` URL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationHandle(String);

impl OperationHandle {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status of a Read job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    /// Any status the service adds later; treated as still in progress
    #[serde(other)]
    Unknown,
}

impl OperationStatus {
    /// Whether polling stops at this status
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Body returned when polling a Read job
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadOperationResult {
    pub status: OperationStatus,
    #[serde(default)]
    pub analyze_result: Option<AnalyzeResult>,
}

impl ReadOperationResult {
    /// Flatten every recognized line, region by region, in service order.
    ///
    /// Returns `None` when the body carries no `analyzeResult`.
    pub fn into_lines(self) -> Option<Vec<String>> {
        let analyze_result = self.analyze_result?;
        Some(
            analyze_result
                .read_results
                .into_iter()
                .flat_map(|region| region.lines.into_iter().map(|line| line.text))
                .collect(),
        )
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    #[serde(default)]
    pub read_results: Vec<ReadResult>,
}

/// One recognized region (a page, for the Read API)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReadResult {
    #[serde(default)]
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Line {
    pub text: String,
}

/// OCR error types
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("OCR service returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("OCR service response is missing the Operation-Location header")]
    MissingOperationLocation,

    #[error("Invalid OCR service response: {0}")]
    InvalidResponse(String),

    #[error("OCR processing failed")]
    ProcessingFailed,

    #[error("OCR processing timed out after {attempts} attempts")]
    Timeout { attempts: u32 },

    #[error("No data received from OCR service")]
    NoData,

    #[error("OCR request failed: {0}")]
    Http(#[from] reqwest::Error),
}
