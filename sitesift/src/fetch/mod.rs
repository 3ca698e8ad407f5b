//! Bounded page fetching.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::config::FetchConfig;
use crate::errors::SiftError;
use crate::protocols::Fetcher;

/// Fetches single pages over HTTP under a shared connection cap.
///
/// Exactly one GET per [`PageFetcher::fetch`] call; there is no built-in
/// retry because per-item failures are isolated by the pipeline rather than
/// retried against third-party sites. The semaphore bounds simultaneously
/// open connections across all concurrent callers sharing this fetcher.
#[derive(Debug)]
pub struct PageFetcher {
    client: reqwest::Client,
    permits: Arc<Semaphore>,
}

impl PageFetcher {
    /// Creates a fetcher from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::ClientConstruction`] if the HTTP client cannot
    /// be constructed.
    pub fn new(config: &FetchConfig) -> Result<Self, SiftError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SiftError::ClientConstruction {
                message: e.to_string(),
            })?;
        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(config.max_connections)),
        })
    }

    /// Fetches one page body.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::Fetch`] on connection/timeout failure or a
    /// non-2xx status.
    pub async fn fetch(&self, url: &str) -> Result<String, SiftError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| SiftError::fetch(url, "connection pool closed"))?;

        debug!(url, "Fetching url");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SiftError::fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiftError::fetch(url, format!("status {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| SiftError::fetch(url, e.to_string()))
    }
}

#[async_trait]
impl Fetcher for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SiftError> {
        Self::fetch(self, url).await
    }
}
