//! OCR Providers
//!
//! Defines the transport trait for asynchronous text recognition and the
//! Azure Computer Vision Read implementation.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

use super::types::{OcrError, OperationHandle, ReadOperationResult};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "operation-location";
const READ_ANALYZE_PATH: &str = "/vision/v3.2/read/analyze";

/// Asynchronous recognition service: submit once, then poll the job.
#[async_trait]
pub trait VisionApi: Send + Sync {
    /// Submit an image and return the handle of the created job
    async fn submit(&self, image_data: &[u8]) -> Result<OperationHandle, OcrError>;

    /// Fetch the job state. `None` means the service answered without a body.
    async fn poll(&self, handle: &OperationHandle) -> Result<Option<ReadOperationResult>, OcrError>;
}

/// Azure Computer Vision Read API (v3.2)
pub struct AzureVisionApi {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl AzureVisionApi {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint, api_key)
    }

    pub fn with_client(client: reqwest::Client, endpoint: &str, api_key: &str) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn analyze_url(&self) -> String {
        format!("{}{}", self.endpoint, READ_ANALYZE_PATH)
    }
}

#[async_trait]
impl VisionApi for AzureVisionApi {
    async fn submit(&self, image_data: &[u8]) -> Result<OperationHandle, OcrError> {
        let response = self
            .client
            .post(self.analyze_url())
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image_data.to_vec())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Api { status, body });
        }

        response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|value| value.to_str().ok())
            .filter(|location| !location.is_empty())
            .map(OperationHandle::new)
            .ok_or(OcrError::MissingOperationLocation)
    }

    async fn poll(&self, handle: &OperationHandle) -> Result<Option<ReadOperationResult>, OcrError> {
        let response = self
            .client
            .get(handle.as_str())
            .header(SUBSCRIPTION_KEY_HEADER, &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OcrError::Api { status, body });
        }

        let body = response.bytes().await?;
        decode_poll_body(&body)
    }
}

/// Decode a poll response body.
///
/// Blank bodies, JSON `null` and documents without a `status` carry no data.
pub(crate) fn decode_poll_body(body: &[u8]) -> Result<Option<ReadOperationResult>, OcrError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    let value: Value =
        serde_json::from_slice(body).map_err(|e| OcrError::InvalidResponse(e.to_string()))?;
    if value.get("status").is_none() {
        return Ok(None);
    }

    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| OcrError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::types::OperationStatus;

    #[test]
    fn test_analyze_url_trims_trailing_slash() {
        let api = AzureVisionApi::new("https://example.cognitiveservices.azure.com/", "key");
        assert_eq!(
            api.analyze_url(),
            "https://example.cognitiveservices.azure.com/vision/v3.2/read/analyze"
        );
    }

    #[test]
    fn test_decode_empty_body() {
        assert!(decode_poll_body(b"").unwrap().is_none());
        assert!(decode_poll_body(b"  \n").unwrap().is_none());
        assert!(decode_poll_body(b"null").unwrap().is_none());
    }

    #[test]
    fn test_decode_body_without_status() {
        assert!(decode_poll_body(b"{}").unwrap().is_none());
        assert!(decode_poll_body(br#"{"analyzeResult":{"readResults":[]}}"#)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_decode_non_string_status_rejected() {
        let err = decode_poll_body(br#"{"status":42}"#).unwrap_err();
        assert!(matches!(err, OcrError::InvalidResponse(_)));
    }

    #[test]
    fn test_decode_running_body() {
        let result = decode_poll_body(br#"{"status":"running","createdDateTime":"x"}"#)
            .unwrap()
            .unwrap();
        assert_eq!(result.status, OperationStatus::Running);
        assert!(result.analyze_result.is_none());
    }

    #[test]
    fn test_decode_garbage_body() {
        let err = decode_poll_body(b"<html>").unwrap_err();
        assert!(matches!(err, OcrError::InvalidResponse(_)));
    }
}
