//! Page fetching
//!
//! This module defines the `PageFetcher` seam used by crawl workers and the
//! HTTP implementation used in production:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests with reqwest's default redirect handling
//! - Error classification into `FetchError`
//! - Link extraction from HTML responses

use crate::config::{FetcherConfig, UserAgentConfig};
use crate::crawler::parser::extract_links;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Errors that can occur while fetching a single page
///
/// None of these are fatal: a worker that receives one abandons the page and
/// moves on to the rest of its frontier.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

/// Source of outbound links for a page
///
/// Implementations retrieve the page at `url` and return its link targets as
/// absolute URLs. Implementations are shared between all workers of a crawl.
pub trait PageFetcher: Send + Sync + 'static {
    /// Fetches `url` and returns the links found on it
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<String>, FetchError>> + Send;
}

/// Builds an HTTP client with the crawler's identification and timeouts
///
/// # Arguments
///
/// * `user_agent` - The user agent configuration
/// * `fetcher` - Request and connect timeouts
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    fetcher: &FetcherConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.value.as_str())
        .timeout(Duration::from_secs(fetcher.request_timeout_secs))
        .connect_timeout(Duration::from_secs(fetcher.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a freshly built client
    pub fn new(user_agent: &UserAgentConfig, fetcher: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(user_agent, fetcher)?,
        })
    }

    /// Wraps an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl PageFetcher for HttpFetcher {
    /// Fetches a page and extracts its anchor targets
    ///
    /// # Request Flow
    ///
    /// 1. Parse the URL; reject if malformed
    /// 2. Send GET (redirects followed by the client)
    /// 3. Non-2xx status → `FetchError::Status`
    /// 4. Non-HTML Content-Type → no links
    /// 5. Parse the body and resolve links against the final URL
    async fn fetch(&self, url: &str) -> Result<Vec<String>, FetchError> {
        let request_url = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let response = self
            .client
            .get(request_url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_ascii_lowercase();

        if !content_type.contains("html") {
            tracing::trace!("Skipping non-HTML response from {} ({})", url, content_type);
            return Ok(Vec::new());
        }

        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        Ok(extract_links(&body, &final_url))
    }
}
