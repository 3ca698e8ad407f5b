//! Search API client with retry and backoff.

use async_trait::async_trait;
use tracing::debug;

use super::response::SearchResponse;
use crate::config::SearchConfig;
use crate::errors::SiftError;
use crate::protocols::Searcher;
use crate::retry::with_retry;

/// Client for the upstream search API.
///
/// One call per [`SearchClient::search`], retried internally on transient
/// failures (connect/timeout errors, 5xx, 429) with exponential backoff up
/// to the configured attempt ceiling. Non-retryable statuses and exhausted
/// retries surface as terminal errors; a response with zero total results
/// is a valid outcome, not an error.
#[derive(Debug)]
pub struct SearchClient {
    config: SearchConfig,
    client: reqwest::Client,
}

impl SearchClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::ClientConstruction`] if the HTTP client cannot
    /// be constructed.
    pub fn new(config: SearchConfig) -> Result<Self, SiftError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SiftError::ClientConstruction {
                message: e.to_string(),
            })?;
        Ok(Self { config, client })
    }

    /// Runs the query, retrying transient failures.
    ///
    /// # Errors
    ///
    /// [`SiftError::SearchTransport`] after retry exhaustion,
    /// [`SiftError::SearchUpstream`] for a non-retryable status, or
    /// [`SiftError::MalformedResponse`] when the body is not the expected
    /// JSON shape.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, SiftError> {
        with_retry(&self.config.retry, "search", SiftError::is_retryable, || {
            self.attempt(query)
        })
        .await
    }

    /// One request attempt, no retry.
    async fn attempt(&self, query: &str) -> Result<SearchResponse, SiftError> {
        debug!(query, endpoint = %self.config.endpoint, "Calling search API");

        let response = self
            .client
            .get(&self.config.endpoint)
            .query(&[
                ("key", self.config.api_key.as_str()),
                ("cx", self.config.collection_id.as_str()),
                ("q", query),
                ("sort", "date"),
            ])
            .send()
            .await
            .map_err(|e| SiftError::search_transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SiftError::SearchUpstream {
                status: status.as_u16(),
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SiftError::MalformedResponse {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl Searcher for SearchClient {
    async fn search(&self, query: &str) -> Result<SearchResponse, SiftError> {
        Self::search(self, query).await
    }
}
