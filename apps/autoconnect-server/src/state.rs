//! Application state management

use std::sync::Arc;

use crate::config::{Config, DEFAULT_MAX_UPLOAD_BYTES};
use crate::ocr::{OcrService, TextRecognizer};
use crate::parser::{BillParser, OllamaBillParser};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    recognizer: Arc<dyn TextRecognizer>,
    parser: Arc<dyn BillParser>,
    max_upload_bytes: usize,
}

impl AppState {
    pub fn new(recognizer: Arc<dyn TextRecognizer>, parser: Arc<dyn BillParser>) -> Self {
        Self::with_upload_limit(recognizer, parser, DEFAULT_MAX_UPLOAD_BYTES)
    }

    pub fn with_upload_limit(
        recognizer: Arc<dyn TextRecognizer>,
        parser: Arc<dyn BillParser>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                recognizer,
                parser,
                max_upload_bytes,
            }),
        }
    }

    /// Wire the production Azure recognizer and Ollama parser
    pub fn from_config(config: &Config) -> Self {
        Self::with_upload_limit(
            Arc::new(OcrService::azure(&config.vision)),
            Arc::new(OllamaBillParser::from_config(&config.llm)),
            config.upload.max_bytes,
        )
    }

    /// Get the text recognizer
    pub fn recognizer(&self) -> &dyn TextRecognizer {
        self.inner.recognizer.as_ref()
    }

    /// Get the bill parser
    pub fn parser(&self) -> &dyn BillParser {
        self.inner.parser.as_ref()
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.inner.max_upload_bytes
    }
}
