//! HTTP document source
//!
//! Fetches one page per request and hands its body to the extraction core
//! unchanged. Failures are reported as typed [`ScrapeError`]s so callers can
//! decide per site whether to skip or abort.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use tracing::{debug, info, warn};

use crate::infrastructure::config::HttpConfig;
use crate::infrastructure::parsing::{ScrapeError, ScrapeResult};
use crate::infrastructure::site_scraper::DocumentSource;

/// Maximum redirects followed when redirects are enabled
const MAX_REDIRECTS: usize = 10;

/// reqwest-backed [`DocumentSource`]
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a client with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(&HttpConfig::default())
    }

    pub fn with_config(config: &HttpConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .redirect(if config.follow_redirects {
                reqwest::redirect::Policy::limited(MAX_REDIRECTS)
            } else {
                reqwest::redirect::Policy::none()
            })
            .build()
            .context("Failed to create HTTP client")?;

        info!(
            "HTTP client ready (timeout {}s, redirects {})",
            config.timeout_seconds,
            if config.follow_redirects { "followed" } else { "disabled" }
        );

        Ok(Self { client })
    }
}

#[async_trait]
impl DocumentSource for HttpClient {
    async fn fetch_document(&self, url: &str) -> ScrapeResult<String> {
        debug!("Fetching document: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            warn!("Request to {} failed: {}", url, e);
            ScrapeError::HttpRequestFailed {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("HTTP error {}: {}", status, url);
            return Err(ScrapeError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::ResponseReadFailed {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
