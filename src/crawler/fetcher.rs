//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the single HTTP client shared by every driver
//! - GET requests for listing and profile pages
//! - Error classification
//!
//! There is no retry: a failed request is reported once and the caller
//! decides whether it ends a listing or only skips a profile.

use crate::config::{CrawlerConfig, SiteConfig};
use crate::CrawlError;
use reqwest::Client;
use std::time::Duration;

/// Builds an HTTP client with proper configuration
///
/// The client owns the connection pool shared by all concurrent drivers.
/// Requests only time out when `request-timeout-secs` is configured.
///
/// # Example
///
/// ```no_run
/// use merocrawl::config::Config;
/// use merocrawl::crawler::build_http_client;
///
/// let config = Config::default();
/// let client = build_http_client(&config.site, &config.crawler).unwrap();
/// ```
pub fn build_http_client(
    site: &SiteConfig,
    crawler: &CrawlerConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(site.user_agent.as_str())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = crawler.request_timeout_secs {
        builder = builder
            .timeout(Duration::from_secs(secs))
            .connect_timeout(Duration::from_secs(secs.min(10)));
    }

    builder.build()
}

/// Fetches a page and returns its body
///
/// # Errors
///
/// | Condition | Error |
/// |-----------|-------|
/// | Timeout | `CrawlError::Timeout` |
/// | Connection or body read failure | `CrawlError::Http` |
/// | Non-2xx status | `CrawlError::HttpStatus` |
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, CrawlError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| classify(url, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| classify(url, e))
}

fn classify(url: &str, error: reqwest::Error) -> CrawlError {
    if error.is_timeout() {
        CrawlError::Timeout {
            url: url.to_string(),
        }
    } else {
        CrawlError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}
