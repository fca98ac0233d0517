//! CLI binary for searchify.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `OcrConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use searchify::{convert_to_file, inspect, OcrConfig};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic conversion — writes scan_searchable.pdf next to the input
  searchify scan.pdf

  # Explicit output path
  searchify scan.pdf -o out/readable.pdf

  # Convert from URL
  searchify https://example.com/archive/scan.pdf

  # Submit more than the default two pages
  searchify --max-pages 5 scan.pdf

  # Inspect PDF metadata (no endpoint or key needed)
  searchify --inspect-only scan.pdf

  # Machine-readable run summary
  searchify --json scan.pdf

ENVIRONMENT VARIABLES:
  AZURE_ENDPOINT   Azure Document Intelligence endpoint,
                   e.g. https://myresource.cognitiveservices.azure.com
  AZURE_API_KEY    Subscription key for that resource

SETUP:
  1. Create a Document Intelligence resource in the Azure portal.
  2. export AZURE_ENDPOINT=https://myresource.cognitiveservices.azure.com
     export AZURE_API_KEY=...
  3. searchify scan.pdf

NOTE:
  Only the first two pages are submitted by default. The service receives
  the document base64-embedded in the request body, and full scans easily
  exceed its request-size limit. Raise --max-pages at your own risk.
"#;

/// Turn scanned PDFs into searchable PDFs via Azure Document Intelligence.
#[derive(Parser, Debug)]
#[command(
    name = "searchify",
    version,
    about = "Turn scanned PDFs into searchable PDFs via Azure Document Intelligence",
    long_about = "Submit a scanned PDF to the Azure Document Intelligence prebuilt-read model, \
wait for the OCR job to finish, and save the rendered searchable PDF (original page images \
with an invisible text layer) next to the source.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Local PDF file path or HTTP/HTTPS URL.
    input: String,

    /// Write the searchable PDF here instead of <stem>_searchable.pdf.
    #[arg(short, long, env = "SEARCHIFY_OUTPUT")]
    output: Option<PathBuf>,

    /// Azure Document Intelligence endpoint base URL.
    #[arg(long, env = "AZURE_ENDPOINT")]
    endpoint: Option<String>,

    /// Azure Document Intelligence subscription key.
    #[arg(long, env = "AZURE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Analysis model id.
    #[arg(long, env = "SEARCHIFY_MODEL", default_value = "prebuilt-read")]
    model: String,

    /// Maximum number of leading pages to submit.
    #[arg(long, env = "SEARCHIFY_MAX_PAGES", default_value_t = 2,
          value_parser = clap::value_parser!(usize))]
    max_pages: usize,

    /// Seconds between job status checks.
    #[arg(long, env = "SEARCHIFY_POLL_INTERVAL", default_value_t = 5)]
    poll_interval: u64,

    /// Give up after this many seconds of polling (0 = wait forever).
    #[arg(long, env = "SEARCHIFY_POLL_TIMEOUT", default_value_t = 600)]
    poll_timeout: u64,

    /// Per-request HTTP timeout in seconds.
    #[arg(long, env = "SEARCHIFY_REQUEST_TIMEOUT", default_value_t = 60)]
    request_timeout: u64,

    /// HTTP download timeout for URL inputs in seconds.
    #[arg(long, env = "SEARCHIFY_DOWNLOAD_TIMEOUT", default_value_t = 120)]
    download_timeout: u64,

    /// Print PDF metadata only, no conversion.
    #[arg(long)]
    inspect_only: bool,

    /// Print a JSON run summary instead of the human-readable one.
    #[arg(long, env = "SEARCHIFY_JSON")]
    json: bool,

    /// Disable the progress spinner.
    #[arg(long, env = "SEARCHIFY_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "SEARCHIFY_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "SEARCHIFY_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // Suppress INFO-level library logs when the spinner is active; the
    // spinner provides all the feedback that matters to the user.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Inspect-only mode ────────────────────────────────────────────────
    if cli.inspect_only {
        let info = inspect(&cli.input).await.context("Failed to inspect PDF")?;

        if cli.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&info).context("Failed to serialise metadata")?
            );
        } else {
            println!("File:         {}", cli.input);
            println!("Pages:        {}", info.page_count);
            println!("PDF Version:  {}", info.pdf_version);
            println!("Encrypted:    {}", info.is_encrypted);
        }
        return Ok(());
    }

    let config = build_config(&cli)?;

    // ── Run conversion ───────────────────────────────────────────────────
    let spinner = if show_progress {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
        );
        bar.set_prefix("Converting");
        bar.set_message("submitting and waiting for OCR…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let result = convert_to_file(&cli.input, cli.output.as_deref(), &config).await;

    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }

    let (output, path) = result.context("Conversion failed")?;

    if cli.json {
        #[derive(serde::Serialize)]
        struct RunSummary<'a> {
            output_path: &'a std::path::Path,
            job_id: &'a str,
            info: &'a searchify::DocumentInfo,
            stats: &'a searchify::ConversionStats,
        }
        let summary = RunSummary {
            output_path: &path,
            job_id: &output.job_id,
            info: &output.info,
            stats: &output.stats,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&summary).context("Failed to serialise summary")?
        );
    } else if !cli.quiet {
        eprintln!(
            "{}  {}/{} pages  {} polls  {}ms  →  {}",
            green("✔"),
            output.info.submitted_pages,
            output.info.page_count,
            output.stats.polls,
            output.stats.total_duration_ms,
            bold(&path.display().to_string()),
        );
        eprintln!(
            "   {} bytes written",
            dim(&output.stats.output_bytes.to_string()),
        );
    }

    Ok(())
}

/// Map CLI args to `OcrConfig`.
fn build_config(cli: &Cli) -> Result<OcrConfig> {
    let endpoint = cli
        .endpoint
        .clone()
        .context("No endpoint given. Pass --endpoint or set AZURE_ENDPOINT.")?;
    let api_key = cli
        .api_key
        .clone()
        .context("No API key given. Pass --api-key or set AZURE_API_KEY.")?;

    let poll_deadline = if cli.poll_timeout == 0 {
        None
    } else {
        Some(Duration::from_secs(cli.poll_timeout))
    };

    OcrConfig::builder()
        .endpoint(endpoint)
        .api_key(api_key)
        .model_id(cli.model.clone())
        .max_pages(cli.max_pages)
        .poll_interval(Duration::from_secs(cli.poll_interval))
        .poll_deadline(poll_deadline)
        .request_timeout_secs(cli.request_timeout)
        .download_timeout_secs(cli.download_timeout)
        .build()
        .context("Invalid configuration")
}
