//! Content source, validation and enrichment contracts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::content::{CandidateItem, ContentType};
use crate::error::FetchError;

/// A source of candidate recommendations for one content type.
///
/// Implementors provide [`fetch`](Self::fetch); callers use
/// [`search`](Self::search), which never fails.
///
/// # Example
///
/// ```ignore
/// let items = fetcher.search("Data Analyst", 5).await;
/// assert!(items.len() <= 5);
/// ```
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Query the backend. Each call is a fresh network or model call.
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, FetchError>;

    /// Content type this fetcher produces.
    fn content_type(&self) -> ContentType;

    /// Name used in logs.
    fn name(&self) -> &str;

    /// Fetch candidates, degrading any failure to an empty list.
    ///
    /// Results keep source order and are truncated to `limit`.
    async fn search(&self, query: &str, limit: usize) -> Vec<CandidateItem> {
        if limit == 0 {
            return Vec::new();
        }

        match self.fetch(query, limit).await {
            Ok(mut items) => {
                items.truncate(limit);
                debug!(
                    fetcher = self.name(),
                    count = items.len(),
                    "Fetched {} candidates",
                    self.content_type()
                );
                items
            }
            Err(e) => {
                warn!(fetcher = self.name(), query, "Fetch failed: {}", e);
                Vec::new()
            }
        }
    }
}

/// Liveness check used as a filter.
#[async_trait]
pub trait UrlValidator: Send + Sync {
    /// True only if the URL answered with a definitive success.
    async fn is_valid(&self, url: &str) -> bool;
}

/// Best-effort preview image lookup.
#[async_trait]
pub trait ThumbnailResolver: Send + Sync {
    /// Resolve a preview image for a resource. Never fails.
    async fn resolve(&self, url: &str, content_type: ContentType) -> Option<String>;
}

/// One fetcher per content type, chosen at configuration time.
#[derive(Clone)]
pub struct FetcherSet {
    pub article: Arc<dyn ContentFetcher>,
    pub video: Arc<dyn ContentFetcher>,
    pub course: Arc<dyn ContentFetcher>,
}

impl FetcherSet {
    pub fn new(
        article: Arc<dyn ContentFetcher>,
        video: Arc<dyn ContentFetcher>,
        course: Arc<dyn ContentFetcher>,
    ) -> Self {
        Self {
            article,
            video,
            course,
        }
    }

    /// Fetcher for a content type.
    pub fn for_type(&self, content_type: ContentType) -> &Arc<dyn ContentFetcher> {
        match content_type {
            ContentType::Article => &self.article,
            ContentType::Video => &self.video,
            ContentType::Course => &self.course,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    #[async_trait]
    impl ContentFetcher for Broken {
        async fn fetch(&self, _query: &str, _limit: usize) -> Result<Vec<CandidateItem>, FetchError> {
            Err(FetchError::Network("connection reset".to_string()))
        }

        fn content_type(&self) -> ContentType {
            ContentType::Video
        }

        fn name(&self) -> &str {
            "Broken"
        }
    }

    struct Many;

    #[async_trait]
    impl ContentFetcher for Many {
        async fn fetch(&self, _query: &str, _limit: usize) -> Result<Vec<CandidateItem>, FetchError> {
            Ok((0..10)
                .map(|i| {
                    CandidateItem::new(
                        format!("Item {}", i),
                        format!("https://example.com/{}", i),
                        "example.com",
                        ContentType::Article,
                    )
                })
                .collect())
        }

        fn content_type(&self) -> ContentType {
            ContentType::Article
        }

        fn name(&self) -> &str {
            "Many"
        }
    }

    #[tokio::test]
    async fn test_search_swallows_errors() {
        assert!(Broken.search("anything", 3).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_truncates_to_limit() {
        let items = Many.search("anything", 4).await;
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].url, "https://example.com/0");
    }

    #[tokio::test]
    async fn test_search_zero_limit_skips_backend() {
        assert!(Broken.search("anything", 0).await.is_empty());
    }
}
