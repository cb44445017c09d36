//! Source fetchers
//!
//! [`HttpFetcher`] downloads sources over HTTP. [`StaticFetcher`] serves
//! in-memory bodies and is used by tests and offline runs.

use binscan_domain::traits::SourceFetcher;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// A single source could not be retrieved
#[derive(Error, Debug)]
pub enum FetchError {
    /// Network failure, timeout or non-success status
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Source unknown to a static fetcher, or scripted to fail
    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Fetches sources with a shared reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher whose requests time out after `timeout`
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("binscan/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl SourceFetcher for HttpFetcher {
    type Error = FetchError;

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching source {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// In-memory fetcher keyed by URL
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    sources: HashMap<String, Result<String, String>>,
}

impl StaticFetcher {
    /// Create an empty fetcher; every URL fails until registered
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`
    pub fn with_source(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.sources.insert(url.into(), Ok(body.into()));
        self
    }

    /// Fail `url` with `reason`
    pub fn with_failure(mut self, url: impl Into<String>, reason: impl Into<String>) -> Self {
        self.sources.insert(url.into(), Err(reason.into()));
        self
    }
}

impl SourceFetcher for StaticFetcher {
    type Error = FetchError;

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        match self.sources.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(reason)) => Err(FetchError::Unavailable(reason.clone())),
            None => Err(FetchError::Unavailable(format!("no such source: {}", url))),
        }
    }
}
