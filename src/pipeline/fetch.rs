//! Artifact retrieval and persistence.
//!
//! Once the poller reports completion, the searchable PDF is exposed as a
//! `/pdf` sub-resource of the status URL. The body is fetched fully into
//! memory before any file is created, so a failed retrieval never leaves
//! a truncated output on disk.

use crate::config::OcrConfig;
use crate::error::SearchifyError;
use crate::pipeline::poll;
use crate::pipeline::submit::SUBSCRIPTION_KEY_HEADER;
use reqwest::{Client, StatusCode};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Full URL of the rendered-PDF artifact for one job.
pub fn artifact_url(config: &OcrConfig, job_id: &str) -> String {
    let status = poll::status_url(config, job_id);
    // The artifact lives under the status path, before its query string.
    match status.split_once('?') {
        Some((path, query)) => format!("{}/pdf?{}", path, query),
        None => format!("{}/pdf", status),
    }
}

/// Fetch the searchable PDF bytes for a completed job.
pub async fn fetch_artifact(
    client: &Client,
    config: &OcrConfig,
    job_id: &str,
) -> Result<Vec<u8>, SearchifyError> {
    let url = artifact_url(config, job_id);
    debug!("Fetching artifact: {}", url);

    let response = client
        .get(&url)
        .header(SUBSCRIPTION_KEY_HEADER, config.api_key.as_str())
        .send()
        .await
        .map_err(|e| SearchifyError::TransportFailed {
            phase: "retrieval",
            reason: e.to_string(),
        })?;

    let status = response.status();
    if status != StatusCode::OK {
        let body = response.text().await.unwrap_or_default();
        return Err(SearchifyError::RetrievalFailed {
            status: status.as_u16(),
            body,
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SearchifyError::TransportFailed {
            phase: "retrieval",
            reason: e.to_string(),
        })?;

    info!("Retrieved searchable PDF: {} bytes", bytes.len());
    Ok(bytes.to_vec())
}

/// Derive the default output path: sibling `<stem>_searchable.pdf`.
///
/// An existing file at the derived path is overwritten silently.
pub fn searchable_output_path(source: &Path) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    source.with_file_name(format!("{stem}_searchable.pdf"))
}

/// Write the artifact bytes to `path`.
pub async fn write_artifact(path: &Path, bytes: &[u8]) -> Result<(), SearchifyError> {
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| SearchifyError::OutputWriteFailed {
            path: path.to_path_buf(),
            source: e,
        })?;
    info!("Searchable PDF saved as {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OcrConfig {
        OcrConfig::builder()
            .endpoint("https://r.cognitiveservices.azure.com")
            .api_key("k")
            .build()
            .unwrap()
    }

    #[test]
    fn artifact_url_inserts_pdf_before_query() {
        assert_eq!(
            artifact_url(&config(), "abc-123"),
            "https://r.cognitiveservices.azure.com/documentintelligence/documentModels/\
             prebuilt-read/analyzeResults/abc-123/pdf?api-version=2024-07-31-preview"
        );
    }

    #[test]
    fn output_path_replaces_extension() {
        assert_eq!(
            searchable_output_path(Path::new("/docs/scan.pdf")),
            PathBuf::from("/docs/scan_searchable.pdf")
        );
    }

    #[test]
    fn output_path_without_extension() {
        assert_eq!(
            searchable_output_path(Path::new("/docs/scan")),
            PathBuf::from("/docs/scan_searchable.pdf")
        );
    }

    #[test]
    fn output_path_keeps_parent_directory() {
        assert_eq!(
            searchable_output_path(Path::new("relative/dir/report.PDF")),
            PathBuf::from("relative/dir/report_searchable.pdf")
        );
    }
}
