//! Testing utilities for the pipeline.
//!
//! Hand-written mock transports with call recording, so pipeline behavior
//! can be asserted without network access.

mod mocks;

pub use mocks::{MockFetcher, MockSearcher};
