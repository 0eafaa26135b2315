//! Test doubles for the GrowWise recommendation pipeline.
//!
//! This crate provides stand-ins for every external collaborator the
//! aggregator talks to:
//! - [`StaticFetcher`] - Returns a fixed list and counts calls
//! - [`FailingFetcher`] - Always fails, exercising the degrade path
//! - [`DelayedFetcher`] - Wraps another fetcher with artificial latency
//! - [`AllowAll`] / [`DenyList`] - Link validators
//! - [`CountingPageLoader`] - Page loader that records every fetch
//! - [`ScriptedModel`] - Language model with canned replies
//!
//! For production sources, use the `content-sources` and `grok-client` crates.
//!
//! # Example
//!
//! ```rust
//! use mock_sources::{ContentFetcher, ContentType, StaticFetcher};
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetcher = StaticFetcher::new(ContentType::Article)
//!         .with_item("Intro to SQL", "https://example.com/sql");
//!
//!     let items = fetcher.search("Data Analyst", 5).await;
//!     assert_eq!(items.len(), 1);
//!     assert_eq!(fetcher.calls(), 1);
//! }
//! ```

mod delayed;
mod enrichers;
mod fetchers;
mod model;

// Re-export learning-core types for convenience
pub use learning_core::{
    async_trait, CandidateItem, Completion, ContentFetcher, ContentType, FetchError, LanguageModel,
    LlmError, ThumbnailResolver, UrlValidator,
};

pub use delayed::{DelayedFetcher, InFlight};
pub use enrichers::{AllowAll, CountingPageLoader, DenyList};
pub use fetchers::{FailingFetcher, StaticFetcher};
pub use model::ScriptedModel;
