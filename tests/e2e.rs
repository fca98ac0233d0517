//! End-to-end tests against a real Azure Document Intelligence resource.
//!
//! These make live API calls and are gated behind the `E2E_ENABLED`
//! environment variable so they do not run in CI unless explicitly
//! requested.
//!
//! Run with:
//!   E2E_ENABLED=1 AZURE_ENDPOINT=… AZURE_API_KEY=… \
//!     SEARCHIFY_E2E_PDF=./test_cases/scan.pdf cargo test --test e2e -- --nocapture

use searchify::{convert, inspect, OcrConfig};
use std::path::PathBuf;

/// Skip this test unless E2E_ENABLED and the Azure credentials are set,
/// and a test PDF path is provided via SEARCHIFY_E2E_PDF.
macro_rules! e2e_skip_unless_ready {
    () => {{
        if std::env::var("E2E_ENABLED").is_err() {
            println!("SKIP — set E2E_ENABLED=1 to run e2e tests");
            return;
        }
        let endpoint = match std::env::var("AZURE_ENDPOINT") {
            Ok(v) if !v.is_empty() => v,
            _ => {
                println!("SKIP — AZURE_ENDPOINT not set");
                return;
            }
        };
        let key = match std::env::var("AZURE_API_KEY") {
            Ok(v) if !v.is_empty() => v,
            _ => {
                println!("SKIP — AZURE_API_KEY not set");
                return;
            }
        };
        let pdf = PathBuf::from(
            std::env::var("SEARCHIFY_E2E_PDF").unwrap_or_else(|_| "test_cases/scan.pdf".into()),
        );
        if !pdf.exists() {
            println!("SKIP — test file not found: {}", pdf.display());
            return;
        }
        (endpoint, key, pdf)
    }};
}

#[tokio::test]
async fn test_inspect_no_credentials_needed() {
    // inspect() needs no endpoint or key, only the file.
    let pdf = PathBuf::from(
        std::env::var("SEARCHIFY_E2E_PDF").unwrap_or_else(|_| "test_cases/scan.pdf".into()),
    );
    if !pdf.exists() {
        println!("SKIP — test file not found: {}", pdf.display());
        return;
    }

    let info = inspect(pdf.to_str().unwrap())
        .await
        .expect("inspect() should succeed");

    assert!(info.page_count > 0);
    assert!(!info.pdf_version.is_empty());
    println!("Info: {:?}", info);
}

#[tokio::test]
async fn test_full_conversion() {
    let (endpoint, key, pdf) = e2e_skip_unless_ready!();

    let config = OcrConfig::builder()
        .endpoint(endpoint)
        .api_key(key)
        .build()
        .expect("valid config");

    let output = convert(pdf.to_str().unwrap(), &config)
        .await
        .expect("conversion should succeed");

    assert!(
        output.pdf.starts_with(b"%PDF"),
        "artifact should be a PDF, got first bytes {:?}",
        &output.pdf[..output.pdf.len().min(8)]
    );
    assert!(output.stats.polls >= 1);
    assert!(output.info.submitted_pages <= 2);
    println!(
        "✓ {} bytes in {}ms ({} polls)",
        output.stats.output_bytes, output.stats.total_duration_ms, output.stats.polls
    );
}
