//! Page-subset extraction and payload encoding.
//!
//! The analyze endpoint takes the document as a base64 string inside the
//! JSON request body, and the request size is capped by the service. This
//! stage bounds the payload by serialising only the first
//! `min(max_pages, page_count)` pages into a fresh single-document buffer
//! before encoding.
//!
//! ## Why spawn_blocking?
//!
//! lopdf parses and rewrites the document synchronously on the calling
//! thread. Wrapping the work in `tokio::task::spawn_blocking` keeps the
//! Tokio workers free while a large scan is being sliced.

use crate::error::SearchifyError;
use crate::output::DocumentInfo;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use lopdf::Document;
use std::path::Path;
use tracing::debug;

/// The encoded page subset, ready to embed in the analyze request body.
pub struct EncodedSubset {
    /// Base64 of the serialised subset document.
    pub base64: String,
    /// Total pages in the source document.
    pub total_pages: usize,
    /// Pages kept in the subset: `min(max_pages, total_pages)`.
    pub submitted_pages: usize,
}

/// Extract the first `max_pages` pages of `path` and base64-encode them.
pub async fn encode_first_pages(
    path: &Path,
    max_pages: usize,
) -> Result<EncodedSubset, SearchifyError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || encode_first_pages_blocking(&path, max_pages))
        .await
        .map_err(|e| SearchifyError::Internal(format!("Subset task panicked: {}", e)))?
}

/// Read page count, encryption flag, and PDF version without any network call.
pub async fn inspect_document(path: &Path) -> Result<DocumentInfo, SearchifyError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || {
        let doc = load_document(&path)?;
        let page_count = doc.get_pages().len();
        Ok(DocumentInfo {
            path: path.clone(),
            page_count,
            submitted_pages: page_count,
            is_encrypted: doc.is_encrypted(),
            pdf_version: doc.version.clone(),
        })
    })
    .await
    .map_err(|e| SearchifyError::Internal(format!("Inspect task panicked: {}", e)))?
}

fn encode_first_pages_blocking(
    path: &Path,
    max_pages: usize,
) -> Result<EncodedSubset, SearchifyError> {
    let doc = load_document(path)?;
    let total_pages = doc.get_pages().len();
    let bytes = subset_bytes(doc, max_pages).map_err(|e| SearchifyError::CorruptPdf {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let submitted_pages = total_pages.min(max_pages);
    debug!(
        "Subset: {} of {} pages, {} bytes serialised",
        submitted_pages,
        total_pages,
        bytes.len()
    );

    Ok(EncodedSubset {
        base64: STANDARD.encode(&bytes),
        total_pages,
        submitted_pages,
    })
}

fn load_document(path: &Path) -> Result<Document, SearchifyError> {
    Document::load(path).map_err(|e| SearchifyError::CorruptPdf {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })
}

/// Serialise the first `max_pages` pages of `doc` into a standalone PDF.
///
/// Pages keep their original order; a document with fewer pages than
/// `max_pages` (including zero) passes through unchanged. Trailing pages
/// are deleted and the orphaned objects pruned so the subset carries no
/// content from the dropped pages.
fn subset_bytes(mut doc: Document, max_pages: usize) -> Result<Vec<u8>, lopdf::Error> {
    let total = doc.get_pages().len();

    if total > max_pages {
        let trailing: Vec<u32> = ((max_pages as u32 + 1)..=(total as u32)).collect();
        doc.delete_pages(&trailing);
        doc.prune_objects();
        doc.renumber_objects();
    }

    let mut buf = Vec::new();
    doc.save_to(&mut buf)?;
    Ok(buf)
}
