//! Loading of series documents from a URL or a local file.
//!
//! Sources starting with `http://` or `https://` are fetched with a blocking
//! HTTP client; anything else is read from disk. The body is parsed as JSON
//! and validated into a [`SeriesDocument`].
//!
//! There is no retry: a failed load surfaces as [`ChartError::Fetch`] and the
//! caller decides what to do with it.
//!
//! ```no_run
//! # use hoverchart::Loader;
//! let loader = Loader::default();
//! let doc = loader.load("static/media/test.json")?;
//! println!("{} samples", doc.samples.len());
//! # Ok::<(), hoverchart::ChartError>(())
//! ```
use crate::error::{ChartError, Result};
use crate::models::SeriesDocument;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Loader {
    http: HttpClient,
}

impl Default for Loader {
    fn default() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }
}

fn is_url(source: &str) -> bool {
    let s = source.trim_start().to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://")
}

impl Loader {
    /// Build a loader whose HTTP requests give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout) // total request timeout
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(concat!("hoverchart/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("falling back to default HTTP client: {e}");
                HttpClient::new()
            });
        Self { http }
    }

    /// Load and validate a document from a URL or path.
    pub fn load(&self, source: &str) -> Result<SeriesDocument> {
        let body = if is_url(source) {
            self.fetch_url(source)?
        } else {
            read_file(source)?
        };
        let doc = parse_document(source, &body)?;
        log::info!("loaded {} samples from {}", doc.samples.len(), source);
        Ok(doc)
    }

    fn fetch_url(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|e| ChartError::fetch(url, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ChartError::fetch(
                url,
                format!("request failed with HTTP {status}"),
            ));
        }
        resp.text().map_err(|e| ChartError::fetch(url, e))
    }
}

fn read_file(path: &str) -> Result<String> {
    std::fs::read_to_string(Path::new(path)).map_err(|e| ChartError::fetch(path, e))
}

/// Parse a JSON body into a validated document.
///
/// JSON syntax errors are load failures (`Fetch`); a well-formed body with the
/// wrong shape is a `MalformedDocument`.
pub fn parse_document(source_name: &str, body: &str) -> Result<SeriesDocument> {
    let v: Value = serde_json::from_str(body)
        .map_err(|e| ChartError::fetch(source_name, format!("invalid JSON: {e}")))?;
    SeriesDocument::from_value(&v)
}
