//! Mock transports for pipeline tests.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use crate::errors::SiftError;
use crate::models::SearchHit;
use crate::protocols::{Fetcher, Searcher};
use crate::search::SearchResponse;

/// A mock searcher that returns scripted responses and records calls.
#[derive(Debug, Default)]
pub struct MockSearcher {
    script: Mutex<Vec<Result<SearchResponse, SiftError>>>,
    queries: Mutex<Vec<String>>,
}

impl MockSearcher {
    /// Creates a searcher that returns an empty response for every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a searcher whose next response carries the given hits.
    #[must_use]
    pub fn returning_hits(hits: Vec<SearchHit>) -> Self {
        let searcher = Self::new();
        searcher.push_response(Ok(SearchResponse::from_hits(hits)));
        searcher
    }

    /// Creates a searcher whose next call fails with the given error.
    #[must_use]
    pub fn returning_error(error: SiftError) -> Self {
        let searcher = Self::new();
        searcher.push_response(Err(error));
        searcher
    }

    /// Queues a response; calls consume the queue front-to-back.
    pub fn push_response(&self, response: Result<SearchResponse, SiftError>) {
        self.script.lock().push(response);
    }

    /// Returns the number of search calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.queries.lock().len()
    }

    /// Returns the queries from each call.
    #[must_use]
    pub fn recorded_queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl Searcher for MockSearcher {
    async fn search(&self, query: &str) -> Result<SearchResponse, SiftError> {
        self.queries.lock().push(query.to_string());
        let mut script = self.script.lock();
        if script.is_empty() {
            Ok(SearchResponse::from_hits(Vec::new()))
        } else {
            script.remove(0)
        }
    }
}

/// A mock fetcher serving in-memory pages, with per-URL failures and
/// delays, recording every requested URL.
#[derive(Debug, Default)]
pub struct MockFetcher {
    pages: Mutex<HashMap<String, String>>,
    failing: Mutex<Vec<String>>,
    delays: Mutex<HashMap<String, Duration>>,
    calls: Mutex<Vec<String>>,
}

impl MockFetcher {
    /// Creates an empty fetcher; unknown URLs fail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a page body for a URL.
    #[must_use]
    pub fn with_page(self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.lock().insert(url.into(), body.into());
        self
    }

    /// Marks a URL as failing with a fetch error.
    #[must_use]
    pub fn with_failure(self, url: impl Into<String>) -> Self {
        self.failing.lock().push(url.into());
        self
    }

    /// Delays responses for a URL, for exercising completion-order skew.
    #[must_use]
    pub fn with_delay(self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.lock().insert(url.into(), delay);
        self
    }

    /// Returns the number of fetch calls made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns how many times the given URL was fetched.
    #[must_use]
    pub fn fetch_count_for(&self, url: &str) -> usize {
        self.calls.lock().iter().filter(|u| *u == url).count()
    }

    /// Returns the URLs from each call, in call order.
    #[must_use]
    pub fn recorded_urls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SiftError> {
        self.calls.lock().push(url.to_string());

        let delay = self.delays.lock().get(url).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.failing.lock().iter().any(|u| u == url) {
            return Err(SiftError::fetch(url, "simulated transport failure"));
        }

        self.pages
            .lock()
            .get(url)
            .cloned()
            .ok_or_else(|| SiftError::fetch(url, "status 404 Not Found"))
    }
}
