//! Fetchers with fixed behaviour.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use learning_core::{CandidateItem, ContentFetcher, ContentType, FetchError};

/// A fetcher that returns the same items on every call.
///
/// Records how often it was called and with which queries.
#[derive(Debug)]
pub struct StaticFetcher {
    content_type: ContentType,
    items: Vec<CandidateItem>,
    calls: AtomicUsize,
    queries: Mutex<Vec<String>>,
}

impl StaticFetcher {
    /// Create a fetcher with no items.
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            items: Vec::new(),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Add an item with this fetcher's content type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use mock_sources::{ContentType, StaticFetcher};
    ///
    /// let fetcher = StaticFetcher::new(ContentType::Video)
    ///     .with_item("SQL in 60 minutes", "https://www.youtube.com/watch?v=HXV3zeQKqGY");
    /// ```
    pub fn with_item(mut self, title: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let source = url
            .split("://")
            .nth(1)
            .and_then(|rest| rest.split('/').next())
            .unwrap_or_default()
            .to_string();
        self.items
            .push(CandidateItem::new(title, url, source, self.content_type));
        self
    }

    /// Add a fully specified item.
    pub fn with_candidate(mut self, item: CandidateItem) -> Self {
        self.items.push(item);
        self
    }

    /// Number of `fetch` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Queries received, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(query.to_string());

        Ok(self.items.iter().take(limit).cloned().collect())
    }

    fn content_type(&self) -> ContentType {
        self.content_type
    }

    fn name(&self) -> &str {
        "StaticFetcher"
    }
}

/// A fetcher whose every call fails with a network error.
#[derive(Debug)]
pub struct FailingFetcher {
    content_type: ContentType,
    calls: AtomicUsize,
}

impl FailingFetcher {
    pub fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `fetch` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentFetcher for FailingFetcher {
    async fn fetch(&self, _query: &str, _limit: usize) -> Result<Vec<CandidateItem>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::Network("connection refused".to_string()))
    }

    fn content_type(&self) -> ContentType {
        self.content_type
    }

    fn name(&self) -> &str {
        "FailingFetcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_fetcher_respects_limit() {
        let fetcher = StaticFetcher::new(ContentType::Article)
            .with_item("A", "https://a.dev/1")
            .with_item("B", "https://b.dev/2")
            .with_item("C", "https://c.dev/3");

        let items = fetcher.search("Data Analyst", 2).await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source, "a.dev");
        assert_eq!(fetcher.queries(), vec!["Data Analyst".to_string()]);
    }

    #[tokio::test]
    async fn test_failing_fetcher_degrades_to_empty() {
        let fetcher = FailingFetcher::new(ContentType::Course);

        assert!(fetcher.search("anything", 4).await.is_empty());
        assert!(fetcher.fetch("anything", 4).await.is_err());
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_limit_skips_backend() {
        let fetcher = StaticFetcher::new(ContentType::Video).with_item("V", "https://youtu.be/abc");

        assert!(fetcher.search("q", 0).await.is_empty());
        assert_eq!(fetcher.calls(), 0);
    }
}
