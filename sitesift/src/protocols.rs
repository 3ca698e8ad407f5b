//! Protocol traits for the pipeline's network-facing components.
//!
//! These are the seams between the pipeline and its transports: production
//! code plugs in [`crate::search::SearchClient`] and
//! [`crate::fetch::PageFetcher`], tests plug in the mocks from
//! [`crate::testing`].

use async_trait::async_trait;

use crate::errors::SiftError;
use crate::search::SearchResponse;

/// Protocol for issuing a search API query.
#[async_trait]
pub trait Searcher: Send + Sync {
    /// Runs the query and returns the raw upstream response.
    async fn search(&self, query: &str) -> Result<SearchResponse, SiftError>;
}

/// Protocol for fetching a single page body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches the URL and returns the response body as text.
    ///
    /// Exactly one attempt per call; retry policy belongs to the caller.
    async fn fetch(&self, url: &str) -> Result<String, SiftError>;
}
