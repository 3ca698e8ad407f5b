//! End-to-end search-and-enrich orchestration.
//!
//! [`Pipeline::run`] calls the search API once (retried internally), then
//! enriches every hit concurrently: rule lookup, exclusion check, page
//! fetch, text extraction, content selection. Search failures are terminal
//! for the run; everything after a successful search is item-local, so one
//! hit's failure never affects its siblings.

#[cfg(test)]
mod integration_tests;

use futures::StreamExt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cancellation::CancellationToken;
use crate::errors::SiftError;
use crate::extract::TextExtractor;
use crate::models::{ResultItem, ResultSet, SearchHit};
use crate::protocols::{Fetcher, Searcher};
use crate::rules::{ContentSelector, RuleTable};

/// Default cap on hits enriched concurrently.
const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 5;

/// Per-item processing result, collected before aggregation so failures
/// never cross the aggregation boundary.
#[derive(Debug)]
enum ItemOutcome {
    /// Fetch and extraction succeeded.
    Enriched(ResultItem),
    /// The rule excluded the URL; no fetch was attempted.
    Excluded { url: String },
    /// Fetch or extraction failed; the item is logged and dropped.
    Dropped { url: String, error: SiftError },
}

/// The search-and-enrich pipeline.
///
/// Stateless across runs: each [`Pipeline::run`] is independent and can be
/// retried by the caller.
pub struct Pipeline {
    searcher: Arc<dyn Searcher>,
    fetcher: Arc<dyn Fetcher>,
    extractor: TextExtractor,
    rules: RuleTable,
    max_concurrent_fetches: usize,
}

impl Pipeline {
    /// Creates a pipeline from its components.
    #[must_use]
    pub fn new(searcher: Arc<dyn Searcher>, fetcher: Arc<dyn Fetcher>, rules: RuleTable) -> Self {
        Self {
            searcher,
            fetcher,
            extractor: TextExtractor::new(),
            rules,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    /// Sets the cap on concurrently enriched hits.
    #[must_use]
    pub const fn with_max_concurrent_fetches(mut self, max: usize) -> Self {
        self.max_concurrent_fetches = max;
        self
    }

    /// Runs the full search-and-enrich pass for one query.
    ///
    /// Output order matches the upstream item order restricted to surviving
    /// items, regardless of fetch completion order. Excluded hits appear as
    /// empty [`ResultItem`]s ("seen but excluded"); failed hits are absent
    /// entirely.
    ///
    /// # Errors
    ///
    /// [`SiftError::SearchTransport`] / [`SiftError::SearchUpstream`] /
    /// [`SiftError::MalformedResponse`] when the search call fails (terminal,
    /// no partial results), or [`SiftError::Cancelled`] if `token` is
    /// cancelled, aborting in-flight fetches.
    pub async fn run(
        &self,
        query: &str,
        token: &CancellationToken,
    ) -> Result<ResultSet, SiftError> {
        if token.is_cancelled() {
            return Err(cancellation_error(token));
        }

        let response = tokio::select! {
            () = token.cancelled() => return Err(cancellation_error(token)),
            response = self.searcher.search(query) => response?,
        };

        if response.total_results()? == 0 {
            warn!(query, "No search result found");
            return Ok(ResultSet::empty());
        }

        let hits = response.hits();
        info!(query, count = hits.len(), "Got search results");

        // buffered() polls up to the cap concurrently but yields in input
        // order, which keeps the output aligned with the upstream ranking.
        let enrich_all = futures::stream::iter(hits)
            .map(|hit| self.process_hit(hit))
            .buffered(self.max_concurrent_fetches.max(1))
            .collect::<Vec<ItemOutcome>>();

        let outcomes = tokio::select! {
            () = token.cancelled() => return Err(cancellation_error(token)),
            outcomes = enrich_all => outcomes,
        };

        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                ItemOutcome::Enriched(item) => {
                    info!(url = %item.url, "Done fetching url");
                    results.push(item);
                }
                ItemOutcome::Excluded { url } => {
                    debug!(url, "Hit excluded by rule");
                    results.push(ResultItem::excluded());
                }
                ItemOutcome::Dropped { url, error } => {
                    warn!(url, kind = error.kind(), error = %error, "Dropping item");
                }
            }
        }

        Ok(ResultSet::new(results))
    }

    /// Resolves the rule for one hit and enriches it.
    async fn process_hit(&self, hit: SearchHit) -> ItemOutcome {
        let selector = match self.rules.lookup(&hit.url) {
            Some(rule) => {
                if rule.is_excluded(&hit.url) {
                    return ItemOutcome::Excluded { url: hit.url };
                }
                Some(rule.selector.clone())
            }
            // No rule for this publisher: fall back to the raw extracted
            // page text.
            None => None,
        };

        match self.enrich(&hit, selector.as_ref()).await {
            Ok(item) => ItemOutcome::Enriched(item),
            Err(error) => ItemOutcome::Dropped {
                url: hit.url,
                error,
            },
        }
    }

    /// Fetches one page and turns it into a result item.
    async fn enrich(
        &self,
        hit: &SearchHit,
        selector: Option<&ContentSelector>,
    ) -> Result<ResultItem, SiftError> {
        let body = self.fetcher.fetch(&hit.url).await?;

        debug!(url = %hit.url, "Parsing content from url");
        let text = self.extractor.to_readable_text(&body);
        let content = match selector {
            Some(selector) => selector.apply(&text, &hit.url)?,
            None => text,
        };

        Ok(ResultItem::new(hit.title.clone(), hit.url.clone(), content))
    }
}

fn cancellation_error(token: &CancellationToken) -> SiftError {
    SiftError::Cancelled {
        reason: token.reason().unwrap_or_else(|| "cancelled".to_string()),
    }
}
