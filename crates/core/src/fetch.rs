//! Content fetching from URLs, files, and stdin.
//!
//! This module provides functions for retrieving content from various
//! sources: HTTP/HTTPS URLs, local files, and standard input.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::analysis::{Analysis, Analyzer, AnalyzerConfig};
use crate::keywords::KeywordSet;
use crate::metadata::{MetaFields, extract_meta_fields};
use crate::{LexiscoreError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: "Mozilla/5.0 (compatible; Lexiscore/0.1)".to_string() }
    }
}

/// Fetches a page from a URL.
///
/// Performs an HTTP GET request and returns the response body as text.
/// Redirects are followed and the configured timeout is respected.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| LexiscoreError::InvalidUrl(e.to_string()))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(LexiscoreError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http or https",
            parsed_url.scheme()
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(LexiscoreError::HttpError)?;

    debug!(url = %parsed_url, timeout = config.timeout, "fetching");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() { LexiscoreError::Timeout { timeout: config.timeout } } else { LexiscoreError::HttpError(e) }
        })?;

    let content = response.text().await?;
    debug!(bytes = content.len(), "fetched");

    Ok(content)
}

/// Reads content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(LexiscoreError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(LexiscoreError::from)
    }
}

/// Reads content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(LexiscoreError::from)?;

    Ok(buffer)
}

/// Host of `url`, used as the base domain for pages fetched from it.
pub fn url_host(url: &str) -> Option<String> {
    Url::parse(url).ok()?.host_str().map(str::to_lowercase)
}

impl Analyzer {
    /// Fetches a page and analyzes it.
    ///
    /// Empty `meta` fields are filled from the page's `<head>`, and when no
    /// base domain is configured the URL's host is used.
    pub async fn fetch_and_analyze(
        &self, url: &str, keywords: &KeywordSet, meta: &MetaFields, fetch_config: &FetchConfig,
    ) -> Result<Analysis> {
        let html = fetch_url(url, fetch_config).await?;
        let meta = meta.clone().or(extract_meta_fields(&html));

        let analyzer = match self.config().base_domain {
            Some(_) => self.clone(),
            None => Analyzer::with_config(AnalyzerConfig { base_domain: url_host(url), ..self.config().clone() }),
        };

        Ok(analyzer.analyze(&html, keywords, &meta))
    }
}
