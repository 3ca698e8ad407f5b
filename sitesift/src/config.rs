//! Configuration types for the search client and page fetcher.
//!
//! Both configs are loaded once at startup and read-only afterwards. Fields
//! deserialize with per-field defaults so partial configs are valid, and
//! `from_env` supports the environment-driven deployment style.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::retry::RetryConfig;

/// Browser-like user agent sent to the search API and target pages.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/108.0.0.0 Safari/537.36";

/// Configuration for the search API client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Search API endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key, sent as the `key` query parameter.
    #[serde(default)]
    pub api_key: String,
    /// Collection (site) id, sent as the `cx` query parameter.
    #[serde(default)]
    pub collection_id: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Retry configuration for transient failures.
    #[serde(default)]
    pub retry: RetryConfig,
}

fn default_endpoint() -> String {
    "https://www.googleapis.com/customsearch/v1".to_string()
}

fn default_timeout() -> f64 {
    10.0
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: String::new(),
            collection_id: String::new(),
            timeout_seconds: default_timeout(),
            user_agent: default_user_agent(),
            retry: RetryConfig::default(),
        }
    }
}

impl SearchConfig {
    /// Creates a new search configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from `SITESIFT_*` environment variables,
    /// falling back to defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("SITESIFT_SEARCH_ENDPOINT") {
            config.endpoint = v;
        }
        if let Ok(v) = std::env::var("SITESIFT_SEARCH_API_KEY") {
            config.api_key = v;
        }
        if let Ok(v) = std::env::var("SITESIFT_COLLECTION_ID") {
            config.collection_id = v;
        }
        if let Ok(v) = std::env::var("SITESIFT_SEARCH_TIMEOUT") {
            if let Ok(secs) = v.parse::<f64>() {
                config.timeout_seconds = secs;
            }
        }
        config
    }

    /// Sets the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the API key.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Sets the collection id.
    #[must_use]
    pub fn with_collection_id(mut self, id: impl Into<String>) -> Self {
        self.collection_id = id.into();
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the retry configuration.
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Gets the timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}

/// Configuration for page fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: f64,
    /// Cap on simultaneously open connections. This is the backpressure
    /// mechanism against third-party sites and local socket exhaustion.
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
    /// User agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_max_connections() -> usize {
    5
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_connections: default_max_connections(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// Creates a new fetch configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: f64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Sets the connection cap.
    #[must_use]
    pub const fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Gets the timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs_f64(self.timeout_seconds)
    }
}
