use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_PASTE_LIMIT: usize = 1000;
pub const DEFAULT_LINE_LIMIT: usize = 100;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ImportError {
    #[error("nothing to import")]
    Empty,
    #[error("not an http(s) URL: {0}")]
    InvalidUrl(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Network(String),
    #[error("this build has no network support")]
    NetworkDisabled,
}

/// Source of remote text. The app only ever sees text or an error.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, ImportError>;
}

pub struct HttpFetcher {
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl Fetch for HttpFetcher {
    #[cfg(feature = "network")]
    fn fetch(&self, url: &str) -> Result<String, ImportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ImportError::Network(e.to_string()))?;
        let response = client
            .get(url)
            .send()
            .map_err(|e| ImportError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::Status(status.as_u16()));
        }
        response
            .text()
            .map_err(|e| ImportError::Network(e.to_string()))
    }

    #[cfg(not(feature = "network"))]
    fn fetch(&self, _url: &str) -> Result<String, ImportError> {
        let _ = self.timeout;
        Err(ImportError::NetworkDisabled)
    }
}

/// Pasted prose, cut to `limit` characters.
pub fn import_pasted(raw: &str, limit: usize) -> Result<String, ImportError> {
    let text: String = raw.chars().take(limit).collect();
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(text)
}

/// Point GitHub file pages at their raw content; other URLs pass through.
pub fn raw_url(url: &str) -> Result<String, ImportError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ImportError::Empty);
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ImportError::InvalidUrl(url.to_string()));
    }
    if url.contains("://github.com/") {
        return Ok(url
            .replacen("://github.com/", "://raw.githubusercontent.com/", 1)
            .replacen("/blob/", "/", 1));
    }
    Ok(url.to_string())
}

pub fn truncate_lines(text: &str, limit: usize) -> String {
    text.split('\n').take(limit).collect::<Vec<_>>().join("\n")
}

/// Fetch a remote file and keep its first `line_limit` lines.
pub fn import_url(
    fetcher: &dyn Fetch,
    url: &str,
    line_limit: usize,
) -> Result<String, ImportError> {
    let url = raw_url(url)?;
    debug!(%url, "fetching import");
    let content = fetcher.fetch(&url).inspect_err(|err| {
        warn!(%url, %err, "import fetch failed");
    })?;
    let text = truncate_lines(&content, line_limit);
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(text)
}
