//! Bill scanning endpoint
//!
//! `POST /api/ocr/scan-bill` accepts a multipart upload carrying one image,
//! runs text recognition on it and hands the recognized lines to the bill
//! parser.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, Result};
use crate::parser::BILL_PROMPT;
use crate::state::AppState;

const NO_FILE_UPLOADED: &str = "No file uploaded";
const NO_TEXT_EXTRACTED: &str = "No text extracted";
const DEFAULT_FILE_NAME: &str = "upload";

/// Successful scan response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanBillResponse {
    pub success: bool,
    pub data: ScanBillData,
    pub file_name: String,
}

#[derive(Debug, Serialize)]
pub struct ScanBillData {
    /// Recognized lines, in reading order
    pub ocr: Vec<String>,
    /// Structured bill produced by the parser
    pub llm: Value,
}

struct UploadedFile {
    file_name: String,
    data: Bytes,
}

/// Create the OCR router
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/scan-bill", post(scan_bill))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

async fn scan_bill(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<ScanBillResponse>> {
    let mut multipart = multipart.map_err(|e| {
        tracing::warn!("Rejected non-multipart upload: {}", e);
        AppError::BadRequest(NO_FILE_UPLOADED.to_string())
    })?;

    let upload = read_file(&mut multipart)
        .await?
        .ok_or_else(|| AppError::BadRequest(NO_FILE_UPLOADED.to_string()))?;

    tracing::info!(
        file_name = %upload.file_name,
        bytes = upload.data.len(),
        "Scanning bill"
    );

    let lines = state.recognizer().recognize(&upload.data).await?;
    if lines.is_empty() {
        tracing::warn!(file_name = %upload.file_name, "No text recognized in upload");
        return Err(AppError::BadRequest(NO_TEXT_EXTRACTED.to_string()));
    }

    let llm = state.parser().parse(&lines, BILL_PROMPT).await?;

    Ok(Json(ScanBillResponse {
        success: true,
        data: ScanBillData { ocr: lines, llm },
        file_name: upload.file_name,
    }))
}

/// Take the first file field (`file`, `image`, or any part with a filename).
///
/// Empty parts count as no file.
async fn read_file(multipart: &mut Multipart) -> Result<Option<UploadedFile>> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        let file_name = field.file_name().map(|s| s.to_string());

        tracing::debug!("Received field: name='{}', filename={:?}", name, file_name);

        if name != "file" && name != "image" && file_name.is_none() {
            continue;
        }

        let data = field.bytes().await.map_err(multipart_error)?;
        if data.is_empty() {
            return Ok(None);
        }

        return Ok(Some(UploadedFile {
            file_name: file_name.unwrap_or_else(|| DEFAULT_FILE_NAME.to_string()),
            data,
        }));
    }

    Ok(None)
}

fn multipart_error(e: axum::extract::multipart::MultipartError) -> AppError {
    tracing::warn!("Failed to read multipart upload: {}", e);
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("File too large".to_string())
    } else {
        AppError::BadRequest("Invalid multipart payload".to_string())
    }
}
