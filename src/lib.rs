//! # searchify
//!
//! Turn a scanned (image-only) PDF into a searchable PDF using Azure
//! Document Intelligence.
//!
//! ## Why this crate?
//!
//! A scanned PDF is just pictures of pages — nothing to select, search, or
//! copy. The `prebuilt-read` model with `output=pdf` runs OCR server-side
//! and returns the original page images with an invisible, positioned text
//! layer overlaid, so the result looks identical but behaves like a born
//! digital document.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input   resolve local file or download from URL
//!  ├─ 2. Subset  keep the first N pages, base64-encode (lopdf, spawn_blocking)
//!  ├─ 3. Submit  POST :analyze, parse the job id from Operation-Location
//!  ├─ 4. Poll    GET status every 5s until 200 (or an error / deadline)
//!  └─ 5. Fetch   GET the /pdf artifact, write <stem>_searchable.pdf
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use searchify::{convert_to_file, OcrConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = OcrConfig::builder()
//!         .endpoint("https://myresource.cognitiveservices.azure.com")
//!         .api_key(std::env::var("AZURE_API_KEY")?)
//!         .build()?;
//!     let (output, path) = convert_to_file("scan.pdf", None, &config).await?;
//!     eprintln!("{} bytes → {} ({} polls)",
//!         output.stats.output_bytes,
//!         path.display(),
//!         output.stats.polls);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `searchify` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! searchify = { version = "0.1", default-features = false }
//! ```
//!
//! ## Scope
//!
//! Only the first two pages are submitted by default (`max_pages`); the
//! payload is embedded base64 in the request body and large documents
//! would blow past the service's request-size limit. Full-document
//! conversion needs a chunk-and-merge strategy this crate does not attempt.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{OcrConfig, OcrConfigBuilder, API_VERSION};
pub use convert::{convert, convert_sync, convert_to_file, inspect};
pub use error::SearchifyError;
pub use output::{ConversionOutput, ConversionStats, DocumentInfo};
pub use pipeline::fetch::searchable_output_path;
