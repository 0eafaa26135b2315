//! Core traits and types for the GrowWise recommendation pipeline.
//!
//! This crate provides the shared interface for every component that takes
//! part in building an employee's learning recommendations. It defines:
//!
//! - [`ContentFetcher`] - The trait every content source implements
//! - [`UrlValidator`] / [`ThumbnailResolver`] - Per-item filters and enrichers
//! - [`LanguageModel`] - A completion service with optional web grounding
//! - [`CandidateItem`], [`LearningIntent`], [`AgentSuggestion`] - Pipeline data
//! - [`LlmError`] / [`FetchError`] - Error types for upstream calls
//!
//! # Example
//!
//! ```rust
//! use learning_core::{async_trait, CandidateItem, ContentFetcher, ContentType, FetchError};
//!
//! struct FixedArticles;
//!
//! #[async_trait]
//! impl ContentFetcher for FixedArticles {
//!     async fn fetch(&self, _query: &str, limit: usize) -> Result<Vec<CandidateItem>, FetchError> {
//!         let item = CandidateItem::new(
//!             "Rust ownership",
//!             "https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html",
//!             "doc.rust-lang.org",
//!             ContentType::Article,
//!         );
//!         Ok(vec![item].into_iter().take(limit).collect())
//!     }
//!
//!     fn content_type(&self) -> ContentType {
//!         ContentType::Article
//!     }
//!
//!     fn name(&self) -> &str {
//!         "FixedArticles"
//!     }
//! }
//! ```

mod agent;
mod content;
mod error;
mod fetcher;
mod intent;
mod llm;

pub use agent::AgentSuggestion;
pub use content::{CandidateItem, ContentType, Quotas};
pub use error::{FetchError, LlmError};
pub use fetcher::{ContentFetcher, FetcherSet, ThumbnailResolver, UrlValidator};
pub use intent::{LearningIntent, Priority, SearchQueries};
pub use llm::{Citation, Completion, CompletionRequest, Grounding, LanguageModel};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
