//! Conversion entry points.
//!
//! The pipeline is strictly sequential — subset, submit, poll, fetch — and
//! handles exactly one document per call. There is no shared state between
//! invocations, so callers wanting multi-document throughput can run
//! several `convert` futures side by side with no coordination.

use crate::config::{OcrConfig, DEFAULT_DOWNLOAD_TIMEOUT_SECS};
use crate::error::SearchifyError;
use crate::output::{ConversionOutput, ConversionStats, DocumentInfo};
use crate::pipeline::{fetch, input, poll, submit, subset};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Convert a scanned PDF (file path or URL) into a searchable PDF.
///
/// This is the primary entry point for the library. The returned
/// [`ConversionOutput`] carries the PDF bytes; use [`convert_to_file`] to
/// persist them in one call.
///
/// # Errors
/// Fail-fast at every phase: input errors (missing/corrupt file),
/// submission errors (non-202 or a missing `Operation-Location` header),
/// polling errors (unexpected status or deadline exceeded), and retrieval
/// errors all abort the run. No output is produced on failure.
pub async fn convert(
    input_str: impl AsRef<str>,
    config: &OcrConfig,
) -> Result<ConversionOutput, SearchifyError> {
    let total_start = Instant::now();
    let input_str = input_str.as_ref();
    info!("Starting conversion: {}", input_str);

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let resolved = input::resolve_input(input_str, config.download_timeout_secs).await?;
    let pdf_path = resolved.path().to_path_buf();

    // ── Step 2: Slice and encode the page subset ─────────────────────────
    let doc_info = subset::inspect_document(&pdf_path).await?;
    let subset_start = Instant::now();
    let encoded = subset::encode_first_pages(&pdf_path, config.max_pages).await?;
    let subset_duration_ms = subset_start.elapsed().as_millis() as u64;
    info!(
        "Submitting {} of {} pages ({} bytes base64)",
        encoded.submitted_pages,
        encoded.total_pages,
        encoded.base64.len()
    );

    // ── Step 3: Submit the analyze job ───────────────────────────────────
    let client = http_client(config)?;
    let job_id = submit::submit(&client, config, &encoded.base64).await?;

    // ── Step 4: Wait for the terminal state ──────────────────────────────
    let poll_start = Instant::now();
    let outcome = poll::wait_for_completion(&client, config, &job_id).await?;
    let poll_duration_ms = poll_start.elapsed().as_millis() as u64;

    // ── Step 5: Fetch the artifact ───────────────────────────────────────
    let pdf = fetch::fetch_artifact(&client, config, &job_id).await?;

    let stats = ConversionStats {
        polls: outcome.polls,
        payload_bytes: encoded.base64.len(),
        output_bytes: pdf.len(),
        subset_duration_ms,
        poll_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Conversion complete: {} polls, {} bytes, {}ms total",
        stats.polls, stats.output_bytes, stats.total_duration_ms
    );

    Ok(ConversionOutput {
        pdf,
        job_id,
        info: DocumentInfo {
            path: pdf_path,
            page_count: encoded.total_pages,
            submitted_pages: encoded.submitted_pages,
            is_encrypted: doc_info.is_encrypted,
            pdf_version: doc_info.pdf_version,
        },
        stats,
    })
}

/// Convert and write the searchable PDF next to the source.
///
/// When `output_path` is `None` the destination is derived from the
/// source path: sibling `<stem>_searchable.pdf`, overwritten silently if
/// it exists. URL inputs have no durable source path, so their derived
/// output lands in the current directory. Returns the output alongside
/// the path written.
pub async fn convert_to_file(
    input_str: impl AsRef<str>,
    output_path: Option<&Path>,
    config: &OcrConfig,
) -> Result<(ConversionOutput, PathBuf), SearchifyError> {
    let input_str = input_str.as_ref();
    let output = convert(input_str, config).await?;
    let path = match output_path {
        Some(p) => p.to_path_buf(),
        // For URL inputs the resolved path lives in a temp dir that is
        // gone by now; derive the name only and write to the current dir.
        None if input::is_url(input_str) => {
            let name = output
                .info
                .path
                .file_name()
                .map(Path::new)
                .unwrap_or_else(|| Path::new("downloaded.pdf"));
            fetch::searchable_output_path(name)
        }
        None => fetch::searchable_output_path(&output.info.path),
    };
    fetch::write_artifact(&path, &output.pdf).await?;
    Ok((output, path))
}

/// Synchronous wrapper around [`convert`].
///
/// Creates a temporary tokio runtime internally.
pub fn convert_sync(
    input_str: impl AsRef<str>,
    config: &OcrConfig,
) -> Result<ConversionOutput, SearchifyError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| SearchifyError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(convert(input_str, config))
}

/// Inspect a PDF (page count, encryption, version) without any API call.
///
/// Does not require an endpoint or credential.
pub async fn inspect(input_str: impl AsRef<str>) -> Result<DocumentInfo, SearchifyError> {
    let resolved = input::resolve_input(input_str.as_ref(), DEFAULT_DOWNLOAD_TIMEOUT_SECS).await?;
    subset::inspect_document(resolved.path()).await
}

/// Shared HTTP client with the configured per-request timeout.
fn http_client(config: &OcrConfig) -> Result<reqwest::Client, SearchifyError> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| SearchifyError::Internal(format!("Failed to build HTTP client: {}", e)))
}
