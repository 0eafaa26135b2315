//! Delayed fetcher - wraps another fetcher with artificial latency.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use learning_core::{CandidateItem, ContentFetcher, ContentType, FetchError};
use tokio::time::sleep;

/// Counts fetches in progress and remembers the high-water mark.
///
/// Share one gauge between several fetchers to observe a combined limit.
#[derive(Debug, Default)]
pub struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    /// Most fetches ever running at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// A fetcher that wraps another fetcher and adds artificial delay.
///
/// Useful for testing that slow sources do not block their siblings, that
/// overlapping runs are serialized and that fan-out stays bounded.
pub struct DelayedFetcher<F: ContentFetcher> {
    inner: F,
    delay: Duration,
    gauge: Arc<InFlight>,
}

impl<F: ContentFetcher> DelayedFetcher<F> {
    /// Create a new DelayedFetcher wrapping the given fetcher.
    pub fn new(inner: F, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            gauge: InFlight::new(),
        }
    }

    /// Record in-flight fetches on a shared gauge.
    pub fn with_gauge(mut self, gauge: Arc<InFlight>) -> Self {
        self.gauge = gauge;
        self
    }

    /// Most fetches this fetcher's gauge has seen at once.
    pub fn peak_in_flight(&self) -> usize {
        self.gauge.peak()
    }

    /// Create a fetcher with a delay in milliseconds.
    pub fn with_millis(inner: F, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// The wrapped fetcher.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

#[async_trait]
impl<F: ContentFetcher> ContentFetcher for DelayedFetcher<F> {
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, FetchError> {
        self.gauge.enter();
        sleep(self.delay).await;
        let result = self.inner.fetch(query, limit).await;
        self.gauge.exit();
        result
    }

    fn content_type(&self) -> ContentType {
        self.inner.content_type()
    }

    fn name(&self) -> &str {
        "DelayedFetcher"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticFetcher;
    use std::time::Instant;

    #[tokio::test]
    async fn test_delayed_fetcher_adds_delay() {
        let inner = StaticFetcher::new(ContentType::Article).with_item("A", "https://a.dev/1");
        let fetcher = DelayedFetcher::with_millis(inner, 50);

        let start = Instant::now();
        let items = fetcher.search("q", 3).await;

        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(items.len(), 1);
        assert_eq!(fetcher.inner().calls(), 1);
        assert_eq!(fetcher.content_type(), ContentType::Article);
    }

    #[tokio::test]
    async fn test_shared_gauge_tracks_peak() {
        let gauge = InFlight::new();
        let a = DelayedFetcher::with_millis(StaticFetcher::new(ContentType::Article), 30).with_gauge(gauge.clone());
        let b = DelayedFetcher::with_millis(StaticFetcher::new(ContentType::Video), 30).with_gauge(gauge.clone());

        tokio::join!(a.search("q", 1), b.search("q", 1));
        a.search("q", 1).await;

        assert_eq!(gauge.peak(), 2);
        assert_eq!(a.peak_in_flight(), 2);
    }
}
