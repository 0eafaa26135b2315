//! Fetchers that call search APIs directly.

mod video_search;
mod web_search;

pub use video_search::VideoSearchFetcher;
pub use web_search::{DomainSearchFetcher, WebSearchClient};
