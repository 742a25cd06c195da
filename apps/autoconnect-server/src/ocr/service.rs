//! OCR Service
//!
//! Wraps the polling client behind the `TextRecognizer` seam used by the
//! HTTP layer.

use std::time::Instant;

use async_trait::async_trait;

use super::{
    client::OcrClient,
    policy::PollPolicy,
    provider::{AzureVisionApi, VisionApi},
    types::OcrError,
};
use crate::config::VisionConfig;

/// Turns an image into recognized lines of text
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(&self, image_data: &[u8]) -> Result<Vec<String>, OcrError>;
}

/// OCR service backed by an asynchronous recognition API
pub struct OcrService<A = AzureVisionApi> {
    client: OcrClient<A>,
}

impl OcrService<AzureVisionApi> {
    /// Build the service against Azure Computer Vision
    pub fn azure(config: &VisionConfig) -> Self {
        Self::new(
            AzureVisionApi::new(&config.endpoint, &config.api_key),
            config.poll,
        )
    }
}

impl<A: VisionApi> OcrService<A> {
    pub fn new(api: A, policy: PollPolicy) -> Self {
        Self {
            client: OcrClient::new(api, policy),
        }
    }

    pub fn policy(&self) -> &PollPolicy {
        self.client.policy()
    }
}

#[async_trait]
impl<A: VisionApi> TextRecognizer for OcrService<A> {
    async fn recognize(&self, image_data: &[u8]) -> Result<Vec<String>, OcrError> {
        let started = Instant::now();
        tracing::debug!(bytes = image_data.len(), "Starting text recognition");

        let lines = self.client.read_lines(image_data).await?;

        tracing::info!(
            lines = lines.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Text recognition complete"
        );
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::types::{OperationHandle, ReadOperationResult};
    use std::time::Duration;

    struct FailingSubmit;

    #[async_trait]
    impl VisionApi for FailingSubmit {
        async fn submit(&self, _image_data: &[u8]) -> Result<OperationHandle, OcrError> {
            Err(OcrError::MissingOperationLocation)
        }

        async fn poll(&self, _handle: &OperationHandle) -> Result<Option<ReadOperationResult>, OcrError> {
            panic!("poll must not run when submission fails");
        }
    }

    #[tokio::test]
    async fn test_submit_error_propagates_untouched() {
        let service = OcrService::new(FailingSubmit, PollPolicy::fixed(2, Duration::from_millis(1)));
        let err = service.recognize(b"png").await.unwrap_err();
        assert!(matches!(err, OcrError::MissingOperationLocation));
    }

    #[test]
    fn test_azure_service_uses_configured_policy() {
        let config = VisionConfig {
            endpoint: "https://vision.test".to_string(),
            api_key: "key".to_string(),
            poll: PollPolicy::fixed(4, Duration::from_millis(200)),
        };
        let service = OcrService::azure(&config);
        assert_eq!(service.policy().attempts(), 4);
        assert_eq!(service.policy().interval, Duration::from_millis(200));
    }
}
