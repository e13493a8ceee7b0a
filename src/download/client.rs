//! HTTP client wrapper for fetching single images.
//!
//! This module provides the `HttpClient` struct which performs one
//! bounded-time GET per URL and validates the response before handing the
//! buffered body back to the caller. Persistence is deliberately not done
//! here so the fetcher stays independently testable against a mock transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, instrument};

use super::constants::REQUEST_TIMEOUT;
use super::error::DownloadError;

/// A single-attempt image fetch.
///
/// The engine drives downloads through this trait so tests can substitute an
/// instrumented transport (for concurrency-bound and isolation properties)
/// without a real network.
#[async_trait]
pub trait Fetch: Send + Sync {
    /// Fetches one URL and returns the full validated response body.
    ///
    /// One attempt, one outcome: no retry happens at this layer.
    ///
    /// # Errors
    ///
    /// Returns a [`DownloadError`] classifying the failure (network, timeout,
    /// bad status, bad content type).
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError>;
}

/// HTTP client for fetching images with response validation.
///
/// Created once and shared across the whole batch to take advantage of
/// connection pooling. Each request carries a fixed wall-clock timeout that
/// covers the full round trip, including the body read.
///
/// # Example
///
/// ```no_run
/// use imageset_core::download::{Fetch, HttpClient};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new();
/// let bytes = client.fetch("https://example.com/cat.jpg").await?;
/// println!("fetched {} bytes", bytes.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient {
    /// Creates a new HTTP client with the default 8 second request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    /// Creates a new HTTP client with an explicit per-request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the supplied
    /// timeout configuration.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self { client }
    }

    /// Fetches one image URL and returns the buffered response body.
    ///
    /// Steps:
    /// 1. GET with the configured timeout; redirects are followed by the
    ///    transport and the final response is what gets validated.
    /// 2. Reject any final status other than exactly 200.
    /// 3. Reject any `content-type` that does not start with `image/`,
    ///    guarding against HTML pages masquerading as 200 OK.
    /// 4. Read the full body into memory.
    ///
    /// There is no upfront URL syntax check - a malformed URL surfaces as a
    /// transport-level [`DownloadError::Network`].
    ///
    /// # Errors
    ///
    /// Returns `DownloadError` if:
    /// - The request fails (network error, DNS failure, invalid URL)
    /// - The fixed deadline elapses before the body completes
    /// - The final status is not 200
    /// - The response is not an image
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        debug!("starting fetch");

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(DownloadError::bad_status(url, status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        if !content_type.starts_with("image/") {
            return Err(DownloadError::bad_content_type(url, content_type));
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                DownloadError::timeout(url)
            } else {
                DownloadError::network(url, e)
            }
        })?;

        debug!(bytes = body.len(), "fetch complete");
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Fetch for HttpClient {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DownloadError> {
        self.fetch_image(url).await
    }
}
