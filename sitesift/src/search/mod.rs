//! Search API client and response shapes.

mod client;
mod response;

pub use client::SearchClient;
pub use response::{SearchInformation, SearchResponse, SearchResponseItem};
