//! Raw search API response shapes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::SiftError;
use crate::models::SearchHit;

/// The raw JSON body returned by the search API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Summary block carrying the total result count.
    #[serde(rename = "searchInformation", default)]
    pub search_information: SearchInformation,
    /// Result rows; absent when the query matched nothing.
    #[serde(default)]
    pub items: Vec<SearchResponseItem>,
}

/// The `searchInformation` block of the response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchInformation {
    /// Total result count, string-encoded by the API.
    #[serde(rename = "totalResults", default)]
    pub total_results: String,
}

/// One raw result row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponseItem {
    /// Result title.
    #[serde(default)]
    pub title: String,
    /// Result URL.
    #[serde(default)]
    pub link: String,
    /// Any other fields the API returned for this row.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl SearchResponse {
    /// Builds a response from already-shaped hits. Used by tests and mocks.
    #[must_use]
    pub fn from_hits(hits: Vec<SearchHit>) -> Self {
        Self {
            search_information: SearchInformation {
                total_results: hits.len().to_string(),
            },
            items: hits
                .into_iter()
                .map(|hit| SearchResponseItem {
                    title: hit.title,
                    link: hit.url,
                    extra: hit.metadata,
                })
                .collect(),
        }
    }

    /// Parses the string-encoded total result count.
    ///
    /// # Errors
    ///
    /// Returns [`SiftError::MalformedResponse`] when the count is not an
    /// integer.
    pub fn total_results(&self) -> Result<u64, SiftError> {
        self.search_information
            .total_results
            .parse::<u64>()
            .map_err(|_| SiftError::MalformedResponse {
                message: format!(
                    "totalResults is not an integer: {:?}",
                    self.search_information.total_results
                ),
            })
    }

    /// Converts the raw rows into [`SearchHit`]s, preserving API order.
    #[must_use]
    pub fn hits(&self) -> Vec<SearchHit> {
        self.items
            .iter()
            .map(|item| SearchHit {
                title: item.title.clone(),
                url: item.link.clone(),
                metadata: item.extra.clone(),
            })
            .collect()
    }
}
