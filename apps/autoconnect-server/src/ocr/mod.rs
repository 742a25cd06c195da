//! OCR Module
//!
//! Text recognition for uploaded bill images.
//!
//! The recognition service works asynchronously: an image is submitted,
//! the service answers with an operation handle, and the job is polled
//! until it succeeds, fails, or the poll budget runs out.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use autoconnect_server::ocr::{OcrService, TextRecognizer};
//!
//! let service = OcrService::azure(&config.vision);
//! let lines = service.recognize(&image_bytes).await?;
//! ```

mod client;
mod policy;
mod provider;
mod service;
mod types;

pub use client::OcrClient;
pub use policy::{Backoff, PollPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
pub use provider::{AzureVisionApi, VisionApi};
pub use service::{OcrService, TextRecognizer};
pub use types::{
    AnalyzeResult, Line, OcrError, OperationHandle, OperationStatus, ReadOperationResult,
    ReadResult,
};
