//! Data models for search hits and enriched results.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row returned by the upstream search API, before enrichment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchHit {
    /// Result title.
    pub title: String,
    /// Result URL.
    pub url: String,
    /// Any other fields the API returned for this row.
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl SearchHit {
    /// Creates a new search hit.
    #[must_use]
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            metadata: HashMap::new(),
        }
    }
}

/// One enriched result.
///
/// An item with empty `title`, `url`, and `content` marks a hit that was
/// seen but intentionally excluded by its rule. Hits that failed fetch or
/// extraction are absent from the output entirely, never emitted as empty
/// placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultItem {
    /// Title from the search hit.
    pub title: String,
    /// URL from the search hit.
    pub url: String,
    /// Clean content snippet extracted from the page.
    pub content: String,
}

impl ResultItem {
    /// Creates a new result item.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }

    /// Marks a hit that was seen but excluded by its rule.
    #[must_use]
    pub fn excluded() -> Self {
        Self::default()
    }

    /// Whether this item is an exclusion marker rather than real content.
    #[must_use]
    pub fn is_excluded(&self) -> bool {
        self.title.is_empty() && self.url.is_empty() && self.content.is_empty()
    }
}

/// The ordered output of one pipeline run.
///
/// Order matches the upstream search response, restricted to hits that were
/// not dropped by a per-item failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResultSet {
    /// The enriched results.
    pub results: Vec<ResultItem>,
}

impl ResultSet {
    /// Creates an empty result set.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a result set from items.
    #[must_use]
    pub fn new(results: Vec<ResultItem>) -> Self {
        Self { results }
    }

    /// Number of items, exclusion markers included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the set has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterates over items carrying real content, skipping exclusion markers.
    pub fn content_items(&self) -> impl Iterator<Item = &ResultItem> {
        self.results.iter().filter(|item| !item.is_excluded())
    }
}
