//! Configuration for a scanned-PDF → searchable-PDF conversion.
//!
//! All behaviour is controlled through [`OcrConfig`], built via its
//! [`OcrConfigBuilder`]. The endpoint and credential are explicit fields —
//! the library never reads environment variables itself, so two conversions
//! against different Azure resources can run in the same process without
//! ambient state. Environment fallbacks (`AZURE_ENDPOINT`, `AZURE_API_KEY`)
//! live in the CLI layer only.

use crate::error::SearchifyError;
use std::time::Duration;
use url::Url;

/// Azure Document Intelligence API version used by every request.
pub const API_VERSION: &str = "2024-07-31-preview";

/// Default download timeout for URL inputs, in seconds.
///
/// Shared by [`OcrConfig::default`] and credential-free entry points
/// that resolve inputs without a full config.
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 120;

/// Configuration for one conversion.
///
/// Built via [`OcrConfig::builder()`].
///
/// # Example
/// ```rust
/// use searchify::OcrConfig;
///
/// let config = OcrConfig::builder()
///     .endpoint("https://myresource.cognitiveservices.azure.com")
///     .api_key("secret")
///     .max_pages(2)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct OcrConfig {
    /// Base URL of the Azure Document Intelligence resource,
    /// e.g. `https://myresource.cognitiveservices.azure.com`. No default.
    pub endpoint: String,

    /// Subscription key sent as `Ocp-Apim-Subscription-Key`. No default.
    pub api_key: String,

    /// Analysis model identifier. Default: `prebuilt-read`.
    ///
    /// `prebuilt-read` is the only prebuilt model that supports
    /// `output=pdf`, which is what produces the invisible text layer.
    pub model_id: String,

    /// Maximum number of leading pages submitted for analysis. Default: 2.
    ///
    /// Bounding the payload keeps the base64 body well under the service's
    /// request-size limit and avoids transport timeouts on large scans.
    /// Full-document support would need a chunk-and-merge strategy, which
    /// this crate deliberately does not attempt.
    pub max_pages: usize,

    /// Delay between consecutive status checks. Default: 5 s.
    ///
    /// Fixed interval, no backoff: the service answers status checks
    /// cheaply, and a single-document job finishes within a handful of
    /// polls at this rate.
    pub poll_interval: Duration,

    /// Wall-clock bound on the whole poll loop. Default: 10 min.
    ///
    /// Checked before each status request; exceeding it surfaces as
    /// [`SearchifyError::PollTimeout`]. `None` waits indefinitely, which
    /// ties the caller to an unresponsive service — use it only when a
    /// supervisor process enforces its own deadline.
    pub poll_deadline: Option<Duration>,

    /// Per-request HTTP timeout in seconds. Default: 60.
    ///
    /// Applies to the analyze, status, and artifact calls individually.
    /// A transport-level timeout surfaces as the failing phase's error.
    pub request_timeout_secs: u64,

    /// Download timeout for URL inputs in seconds. Default: 120.
    pub download_timeout_secs: u64,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            model_id: "prebuilt-read".to_string(),
            max_pages: 2,
            poll_interval: Duration::from_secs(5),
            poll_deadline: Some(Duration::from_secs(600)),
            request_timeout_secs: 60,
            download_timeout_secs: DEFAULT_DOWNLOAD_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for OcrConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model_id", &self.model_id)
            .field("max_pages", &self.max_pages)
            .field("poll_interval", &self.poll_interval)
            .field("poll_deadline", &self.poll_deadline)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("download_timeout_secs", &self.download_timeout_secs)
            .finish()
    }
}

impl OcrConfig {
    /// Create a new builder for `OcrConfig`.
    pub fn builder() -> OcrConfigBuilder {
        OcrConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`OcrConfig`].
#[derive(Debug)]
pub struct OcrConfigBuilder {
    config: OcrConfig,
}

impl OcrConfigBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        // Trailing slashes would double up when operation paths are appended.
        self.config.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn model_id(mut self, model: impl Into<String>) -> Self {
        self.config.model_id = model.into();
        self
    }

    pub fn max_pages(mut self, n: usize) -> Self {
        self.config.max_pages = n.max(1);
        self
    }

    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.poll_interval = interval;
        self
    }

    pub fn poll_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.config.poll_deadline = deadline;
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<OcrConfig, SearchifyError> {
        let c = &self.config;
        if c.endpoint.is_empty() {
            return Err(SearchifyError::InvalidConfig(
                "Endpoint must not be empty".into(),
            ));
        }
        match Url::parse(&c.endpoint) {
            Ok(u) if u.scheme() == "http" || u.scheme() == "https" => {}
            Ok(u) => {
                return Err(SearchifyError::InvalidConfig(format!(
                    "Endpoint must be an http(s) URL, got scheme '{}'",
                    u.scheme()
                )));
            }
            Err(e) => {
                return Err(SearchifyError::InvalidConfig(format!(
                    "Endpoint is not a valid URL: {e}"
                )));
            }
        }
        if c.api_key.is_empty() {
            return Err(SearchifyError::InvalidConfig(
                "API key must not be empty".into(),
            ));
        }
        if c.model_id.is_empty() {
            return Err(SearchifyError::InvalidConfig(
                "Model id must not be empty".into(),
            ));
        }
        if c.poll_interval.is_zero() {
            return Err(SearchifyError::InvalidConfig(
                "Poll interval must be greater than zero".into(),
            ));
        }
        Ok(self.config)
    }
}
