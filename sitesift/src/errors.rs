//! Error types for the sitesift pipeline.
//!
//! The taxonomy separates search-level failures, which are terminal for a
//! whole run, from per-item failures, which are isolated to the hit that
//! produced them.

use thiserror::Error;

/// The main error type for sitesift operations.
#[derive(Debug, Error)]
pub enum SiftError {
    /// Network-level failure calling the search API (connect, timeout).
    ///
    /// Retried with backoff by [`crate::search::SearchClient`]; surfaces
    /// only after the attempt ceiling is exhausted.
    #[error("search transport error: {message}")]
    SearchTransport {
        /// Description of the underlying transport failure.
        message: String,
    },

    /// Non-retryable HTTP status from the search API.
    #[error("search API returned status {status}")]
    SearchUpstream {
        /// The HTTP status code.
        status: u16,
    },

    /// The search API returned a body that does not match the expected shape.
    #[error("malformed search response: {message}")]
    MalformedResponse {
        /// What failed to parse.
        message: String,
    },

    /// Network or HTTP failure retrieving one page. Item-local.
    #[error("fetch failed for {url}: {message}")]
    Fetch {
        /// The page URL.
        url: String,
        /// Description of the failure (status or transport).
        message: String,
    },

    /// An extraction rule's markers were absent from the page text. Item-local.
    #[error("content markers not found in {url}")]
    ContentNotFound {
        /// The page URL.
        url: String,
    },

    /// An extraction rule could not be constructed (invalid marker pattern).
    #[error("invalid extraction rule pattern {pattern:?}: {message}")]
    Rule {
        /// The marker pattern that failed to compile.
        pattern: String,
        /// The pattern error.
        message: String,
    },

    /// The HTTP client could not be constructed at startup.
    #[error("failed to construct HTTP client: {message}")]
    ClientConstruction {
        /// The builder error.
        message: String,
    },

    /// The run was cancelled by the caller.
    #[error("run cancelled: {reason}")]
    Cancelled {
        /// The cancellation reason.
        reason: String,
    },
}

impl SiftError {
    /// Creates a search transport error.
    #[must_use]
    pub fn search_transport(message: impl Into<String>) -> Self {
        Self::SearchTransport {
            message: message.into(),
        }
    }

    /// Creates a fetch error.
    #[must_use]
    pub fn fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a content-not-found error.
    #[must_use]
    pub fn content_not_found(url: impl Into<String>) -> Self {
        Self::ContentNotFound { url: url.into() }
    }

    /// A stable label for the failure kind, used in structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SearchTransport { .. } => "search_transport",
            Self::SearchUpstream { .. } => "search_upstream",
            Self::MalformedResponse { .. } => "malformed_response",
            Self::Fetch { .. } => "fetch",
            Self::ContentNotFound { .. } => "content_not_found",
            Self::Rule { .. } => "rule",
            Self::ClientConstruction { .. } => "client_construction",
            Self::Cancelled { .. } => "cancelled",
        }
    }

    /// Whether the search retry loop should try again after this error.
    ///
    /// Transport failures and retryable statuses (5xx, 429) qualify; any
    /// other upstream status is terminal.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::SearchTransport { .. } => true,
            Self::SearchUpstream { status } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
