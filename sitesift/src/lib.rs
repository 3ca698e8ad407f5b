//! # Sitesift
//!
//! A search-and-enrich pipeline: given a free-text query, sitesift calls an
//! external search API, fetches the live page behind every hit, strips it
//! to readable text, and applies a per-publisher extraction rule to yield a
//! clean content snippet.
//!
//! The crate exposes one entry point, [`pipeline::Pipeline::run`], plus the
//! leaf components it is assembled from:
//!
//! - **Rule table**: ordered per-publisher extraction rules with
//!   first-substring-match lookup and URL exclusions
//! - **Text extraction**: HTML to link-free, markdown-ish readable text
//! - **Search client**: parameterized search API calls with retry/backoff
//! - **Page fetcher**: single-attempt GETs under a shared connection cap
//! - **Cancellation**: cooperative tokens that abort in-flight fetches
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sitesift::prelude::*;
//! use std::sync::Arc;
//!
//! let search = Arc::new(SearchClient::new(SearchConfig::from_env())?);
//! let fetcher = Arc::new(PageFetcher::new(&FetchConfig::default())?);
//! let pipeline = Pipeline::new(search, fetcher, RuleTable::defaults()?);
//!
//! let token = CancellationToken::new();
//! let results = pipeline.run("budgeting tips", &token).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod cancellation;
pub mod config;
pub mod errors;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod observability;
pub mod pipeline;
pub mod protocols;
pub mod retry;
pub mod rules;
pub mod search;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cancellation::CancellationToken;
    pub use crate::config::{FetchConfig, SearchConfig};
    pub use crate::errors::SiftError;
    pub use crate::extract::TextExtractor;
    pub use crate::fetch::PageFetcher;
    pub use crate::models::{ResultItem, ResultSet, SearchHit};
    pub use crate::pipeline::Pipeline;
    pub use crate::protocols::{Fetcher, Searcher};
    pub use crate::retry::{BackoffStrategy, JitterStrategy, RetryConfig};
    pub use crate::rules::{ContentSelector, ExtractionRule, RuleTable};
    pub use crate::search::{SearchClient, SearchResponse};
}
