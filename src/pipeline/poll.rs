//! Completion waiting: poll the job status until a terminal state.
//!
//! The job walks a three-state machine: Running (202), Complete (200),
//! Errored (anything else). The service never reports a completed job as
//! running again, so the loop exits on the first non-202 answer.
//!
//! The inter-poll delay is a fixed `poll_interval` with no backoff or
//! jitter. The wait is a `tokio::time::sleep`, so many conversions can
//! share a worker pool without a thread parked per document. A wall-clock
//! `poll_deadline` is checked before each request and turns an unresponsive
//! service into [`SearchifyError::PollTimeout`] instead of an indefinite
//! hang.

use crate::config::{OcrConfig, API_VERSION};
use crate::error::SearchifyError;
use crate::pipeline::submit::SUBSCRIPTION_KEY_HEADER;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tracing::{debug, info};

/// Outcome of a completed poll loop.
pub struct PollOutcome {
    /// Status checks issued, including the final 200.
    pub polls: u32,
}

/// Full URL of the status-check operation for one job.
pub fn status_url(config: &OcrConfig, job_id: &str) -> String {
    format!(
        "{}/documentintelligence/documentModels/{}/analyzeResults/{}?api-version={}",
        config.endpoint, config.model_id, job_id, API_VERSION
    )
}

/// Block (cooperatively) until the job reaches a terminal state.
///
/// Returns [`PollOutcome`] when the job completes; any error state
/// surfaces immediately without a retry.
pub async fn wait_for_completion(
    client: &Client,
    config: &OcrConfig,
    job_id: &str,
) -> Result<PollOutcome, SearchifyError> {
    let url = status_url(config, job_id);
    let started = Instant::now();
    let mut polls: u32 = 0;

    loop {
        if let Some(deadline) = config.poll_deadline {
            if started.elapsed() >= deadline {
                return Err(SearchifyError::PollTimeout {
                    waited: started.elapsed(),
                    polls,
                });
            }
        }

        let response = client
            .get(&url)
            .header(SUBSCRIPTION_KEY_HEADER, config.api_key.as_str())
            .send()
            .await
            .map_err(|e| SearchifyError::TransportFailed {
                phase: "polling",
                reason: e.to_string(),
            })?;
        polls += 1;

        match response.status() {
            StatusCode::OK => {
                info!("Job {} complete after {} status checks", job_id, polls);
                return Ok(PollOutcome { polls });
            }
            StatusCode::ACCEPTED => {
                debug!(
                    "Job {} still running (check {}), sleeping {:?}",
                    job_id, polls, config.poll_interval
                );
                tokio::time::sleep(config.poll_interval).await;
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                return Err(SearchifyError::PollingFailed {
                    status: status.as_u16(),
                    body,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_url_shape() {
        let config = OcrConfig::builder()
            .endpoint("https://r.cognitiveservices.azure.com")
            .api_key("k")
            .build()
            .unwrap();
        assert_eq!(
            status_url(&config, "abc-123"),
            "https://r.cognitiveservices.azure.com/documentintelligence/documentModels/\
             prebuilt-read/analyzeResults/abc-123?api-version=2024-07-31-preview"
        );
    }
}
