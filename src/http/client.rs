//! Upstream HTTP client.
//!
//! # Responsibilities
//! - Fetch the page body for an incoming request path
//! - Fetch individual font assets directly to a local file
//! - Enforce configured connect/request timeouts on every fetch
//!
//! # Design Decisions
//! - One shared reqwest client; connections are pooled across requests
//! - Non-success upstream statuses are surfaced as errors, never bodies
//! - The origin is fixed at construction; callers pass only paths

use std::path::Path;
use std::time::Duration;

use crate::config::TimeoutConfig;
use crate::error::ProxyError;

/// Client bound to the fixed upstream origin.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    origin: String,
    http: reqwest::Client,
    asset_timeout: Duration,
}

impl UpstreamClient {
    /// Build a client for the given origin with configured timeouts.
    pub fn new(origin: impl Into<String>, timeouts: &TimeoutConfig) -> Result<Self, ProxyError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;

        Ok(Self {
            origin: origin.into(),
            http,
            asset_timeout: Duration::from_secs(timeouts.asset_fetch_secs),
        })
    }

    /// The upstream origin this client is bound to.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Fetch the page at `<origin><path_and_query>` and decode it as text.
    pub async fn fetch_page(&self, path_and_query: &str) -> Result<String, ProxyError> {
        let url = format!("{}{}", self.origin, path_and_query);
        let response = self.http.get(&url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }

    /// Fetch `<origin><path>` and write the raw bytes to `destination`.
    ///
    /// The caller is responsible for parent directories existing.
    pub async fn download_to_file(
        &self,
        path: &str,
        destination: &Path,
    ) -> Result<(), ProxyError> {
        let url = format!("{}{}", self.origin, path);
        let response = self
            .http
            .get(&url)
            .timeout(self.asset_timeout)
            .send()
            .await?
            .error_for_status()?;
        let bytes = response.bytes().await?;

        tokio::fs::write(destination, &bytes)
            .await
            .map_err(|source| ProxyError::AssetIo {
                path: destination.to_path_buf(),
                source,
            })?;

        Ok(())
    }
}
