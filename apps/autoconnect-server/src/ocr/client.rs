//! OCR polling client
//!
//! Hides the submit-then-poll job semantics of the recognition service
//! behind a single `read_lines` call.

use super::policy::PollPolicy;
use super::provider::VisionApi;
use super::types::{OcrError, OperationStatus};

pub struct OcrClient<A> {
    api: A,
    policy: PollPolicy,
}

impl<A: VisionApi> OcrClient<A> {
    pub fn new(api: A, policy: PollPolicy) -> Self {
        Self { api, policy }
    }

    pub fn policy(&self) -> &PollPolicy {
        &self.policy
    }

    /// Submit `image_data` and wait for the recognized lines.
    ///
    /// Lines come back region by region in the order the service reports
    /// them. A `failed` job stops polling immediately; a job still running
    /// after the last attempt yields [`OcrError::Timeout`].
    pub async fn read_lines(&self, image_data: &[u8]) -> Result<Vec<String>, OcrError> {
        let handle = self.api.submit(image_data).await?;
        tracing::debug!(operation = %handle, "Read operation submitted");

        let attempts = self.policy.attempts();
        for attempt in 1..=attempts {
            tokio::time::sleep(self.policy.delay_before(attempt)).await;

            let result = self.api.poll(&handle).await?.ok_or(OcrError::NoData)?;
            tracing::debug!(attempt, status = ?result.status, "Polled read operation");

            match result.status {
                OperationStatus::Succeeded => return result.into_lines().ok_or(OcrError::NoData),
                OperationStatus::Failed => return Err(OcrError::ProcessingFailed),
                _ => continue,
            }
        }

        tracing::warn!(operation = %handle, attempts, "Read operation did not finish in time");
        Err(OcrError::Timeout { attempts })
    }
}
