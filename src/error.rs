//! Error types for the searchify library.
//!
//! One enum, grouped by pipeline phase. Every remote failure carries the
//! HTTP status code and the response body verbatim so the problem can be
//! diagnosed without re-running the job against the service. Nothing is
//! retried automatically: the pipeline is fail-fast, and no output file is
//! written on any failure path.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// All errors returned by the searchify library.
#[derive(Debug, Error)]
pub enum SearchifyError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input string is not a valid file path or URL.
    #[error("Invalid input '{input}': not a file path or a valid HTTP/HTTPS URL")]
    InvalidInput { input: String },

    /// HTTP URL was syntactically valid but download failed.
    #[error("Failed to download '{url}': {reason}\nCheck your internet connection.")]
    DownloadFailed { url: String, reason: String },

    /// Download exceeded the configured timeout.
    #[error("Download timed out after {secs}s for '{url}'\nIncrease --download-timeout.")]
    DownloadTimeout { url: String, secs: u64 },

    /// The file exists and was read, but is not a PDF.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    // ── Submission errors ─────────────────────────────────────────────────
    /// The analyze request returned anything other than HTTP 202.
    #[error("Analyze submission rejected: HTTP {status}\n{body}")]
    SubmissionFailed { status: u16, body: String },

    /// HTTP 202 without an Operation-Location header.
    ///
    /// The asynchronous contract requires the service to say where to poll;
    /// a 202 without it leaves the job unreachable.
    #[error(
        "Operation-Location header missing from the analyze response.\n\
         The service accepted the job but gave no status URL to poll."
    )]
    MissingOperationLocation,

    /// Operation-Location was present but no job id could be parsed from it.
    #[error("Could not extract a job id from Operation-Location: '{value}'")]
    InvalidOperationLocation { value: String },

    // ── Polling errors ────────────────────────────────────────────────────
    /// A status check returned something other than 200 (done) or 202 (running).
    #[error("Status check failed: HTTP {status}\n{body}")]
    PollingFailed { status: u16, body: String },

    /// The job did not reach a terminal state within the configured deadline.
    #[error(
        "OCR job still running after {waited:?} ({polls} status checks).\n\
         Increase --poll-timeout or set it to 0 to wait indefinitely."
    )]
    PollTimeout { waited: Duration, polls: u32 },

    // ── Retrieval errors ──────────────────────────────────────────────────
    /// The artifact request returned anything other than HTTP 200.
    #[error("Failed to retrieve the searchable PDF: HTTP {status}\n{body}")]
    RetrievalFailed { status: u16, body: String },

    // ── Transport errors ──────────────────────────────────────────────────
    /// The HTTP request itself failed (connect error, transport timeout)
    /// before the service could answer with a status code.
    #[error("HTTP request failed during {phase}: {reason}")]
    TransportFailed {
        phase: &'static str,
        reason: String,
    },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write the output PDF file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
