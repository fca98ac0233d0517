//! Output types returned by the conversion entry points.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionOutput {
    /// The searchable PDF returned by the service.
    #[serde(skip)]
    pub pdf: Vec<u8>,

    /// Remote job id parsed from the Operation-Location header.
    pub job_id: String,

    /// Document facts gathered before submission.
    pub info: DocumentInfo,

    /// Timing and polling statistics.
    pub stats: ConversionStats,
}

/// Facts about the source document, available without any network call
/// via [`crate::inspect`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    /// Resolved local path of the source (for URL inputs, the temp copy).
    pub path: PathBuf,
    /// Total pages in the source document.
    pub page_count: usize,
    /// Pages actually submitted: `min(max_pages, page_count)`.
    pub submitted_pages: usize,
    /// Whether the document is encrypted.
    pub is_encrypted: bool,
    /// PDF version string from the header, e.g. "1.7".
    pub pdf_version: String,
}

/// Statistics for one conversion run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionStats {
    /// Number of status checks issued, including the final 200.
    pub polls: u32,
    /// Size of the base64 payload sent to the service, in bytes.
    pub payload_bytes: usize,
    /// Size of the searchable PDF returned, in bytes.
    pub output_bytes: usize,
    /// Time spent extracting and encoding the page subset.
    pub subset_duration_ms: u64,
    /// Time spent between submission and job completion.
    pub poll_duration_ms: u64,
    /// Wall-clock time for the whole conversion.
    pub total_duration_ms: u64,
}
