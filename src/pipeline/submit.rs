//! Job submission: POST the encoded payload, extract the job handle.
//!
//! The analyze call is fire-and-forget on the service side: a successful
//! submission answers HTTP 202 with an empty body and an
//! `Operation-Location` header pointing at the status URL. The job id is
//! the last path segment of that URL (before any query string), parsed by
//! [`job_id_from_operation_location`] — a pure function so the header
//! contract can be tested without a network in sight.
//!
//! Submission is not idempotent: re-posting the same payload starts a
//! new, distinct job.

use crate::config::{OcrConfig, API_VERSION};
use crate::error::SearchifyError;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::{debug, info};

/// Credential header expected by Azure Document Intelligence.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Header carrying the status URL on an accepted submission.
pub const OPERATION_LOCATION_HEADER: &str = "Operation-Location";

#[derive(Serialize)]
struct AnalyzeRequest<'a> {
    #[serde(rename = "base64Source")]
    base64_source: &'a str,
}

/// Full URL of the analyze operation for `config`.
///
/// `output=pdf` asks the service to render the searchable PDF artifact
/// alongside the analysis result.
pub fn analyze_url(config: &OcrConfig) -> String {
    format!(
        "{}/documentintelligence/documentModels/{}:analyze\
         ?_overload=analyzeDocument&api-version={}&output=pdf",
        config.endpoint, config.model_id, API_VERSION
    )
}

/// Submit the base64 payload and return the job id.
pub async fn submit(
    client: &Client,
    config: &OcrConfig,
    payload: &str,
) -> Result<String, SearchifyError> {
    let url = analyze_url(config);
    debug!("Submitting analyze request: {}", url);

    let response = client
        .post(&url)
        .header(SUBSCRIPTION_KEY_HEADER, config.api_key.as_str())
        .json(&AnalyzeRequest {
            base64_source: payload,
        })
        .send()
        .await
        .map_err(|e| SearchifyError::TransportFailed {
            phase: "submission",
            reason: e.to_string(),
        })?;

    let status = response.status();
    if status != StatusCode::ACCEPTED {
        let body = response.text().await.unwrap_or_default();
        return Err(SearchifyError::SubmissionFailed {
            status: status.as_u16(),
            body,
        });
    }

    let location = response
        .headers()
        .get(OPERATION_LOCATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or(SearchifyError::MissingOperationLocation)?;

    let job_id = job_id_from_operation_location(&location).ok_or_else(|| {
        SearchifyError::InvalidOperationLocation {
            value: location.clone(),
        }
    })?;

    info!("Job accepted: {}", job_id);
    Ok(job_id)
}

/// Extract the job id from an Operation-Location header value.
///
/// The id is the last path segment of the URL, ignoring any trailing
/// query string. Returns `None` when no non-empty segment exists.
pub fn job_id_from_operation_location(value: &str) -> Option<String> {
    let without_query = value.split('?').next().unwrap_or(value);
    let segment = without_query.trim_end_matches('/').rsplit('/').next()?;
    if segment.is_empty() || segment.contains(':') {
        // A bare scheme ("https:") or empty value carries no id.
        return None;
    }
    Some(segment.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_id_with_query_string() {
        let v = "https://r.cognitiveservices.azure.com/documentintelligence/\
                 documentModels/prebuilt-read/analyzeResults/abc-123?api-version=2024-07-31-preview";
        assert_eq!(job_id_from_operation_location(v).as_deref(), Some("abc-123"));
    }

    #[test]
    fn job_id_without_query_string() {
        let v = "https://r.cognitiveservices.azure.com/documentintelligence/\
                 documentModels/prebuilt-read/analyzeResults/abc-123";
        assert_eq!(job_id_from_operation_location(v).as_deref(), Some("abc-123"));
    }

    #[test]
    fn job_id_ignores_trailing_slash() {
        let v = "https://r.example.com/analyzeResults/abc-123/";
        assert_eq!(job_id_from_operation_location(v).as_deref(), Some("abc-123"));
    }

    #[test]
    fn job_id_rejects_empty_and_degenerate_values() {
        assert_eq!(job_id_from_operation_location(""), None);
        assert_eq!(job_id_from_operation_location("https://"), None);
        assert_eq!(job_id_from_operation_location("?api-version=x"), None);
    }

    #[test]
    fn analyze_url_shape() {
        let config = OcrConfig::builder()
            .endpoint("https://r.cognitiveservices.azure.com")
            .api_key("k")
            .build()
            .unwrap();
        let url = analyze_url(&config);
        assert!(url.starts_with(
            "https://r.cognitiveservices.azure.com/documentintelligence/documentModels/prebuilt-read:analyze?"
        ));
        assert!(url.contains("_overload=analyzeDocument"));
        assert!(url.contains("api-version=2024-07-31-preview"));
        assert!(url.contains("output=pdf"));
    }
}
