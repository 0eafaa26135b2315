//! Link validators and page loaders.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use content_sources::PageLoader;
use learning_core::UrlValidator;

/// Accepts every link.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl UrlValidator for AllowAll {
    async fn is_valid(&self, _url: &str) -> bool {
        true
    }
}

/// Rejects a fixed set of links and accepts the rest.
#[derive(Debug, Default)]
pub struct DenyList {
    denied: HashSet<String>,
    checks: AtomicUsize,
}

impl DenyList {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            denied: urls.into_iter().map(Into::into).collect(),
            checks: AtomicUsize::new(0),
        }
    }

    /// Number of links checked so far.
    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlValidator for DenyList {
    async fn is_valid(&self, url: &str) -> bool {
        self.checks.fetch_add(1, Ordering::SeqCst);
        !self.denied.contains(url)
    }
}

/// Serves one HTML body for every page and records the URLs requested.
#[derive(Debug)]
pub struct CountingPageLoader {
    body: Option<String>,
    loaded: Mutex<Vec<String>>,
}

impl CountingPageLoader {
    /// Every page carries `og:image` pointing at `image_url`.
    pub fn with_og_image(image_url: &str) -> Self {
        let body = format!(
            r#"<html><head><meta property="og:image" content="{}"></head><body></body></html>"#,
            image_url
        );
        Self {
            body: Some(body),
            loaded: Mutex::new(Vec::new()),
        }
    }

    /// Every page load fails.
    pub fn unreachable() -> Self {
        Self {
            body: None,
            loaded: Mutex::new(Vec::new()),
        }
    }

    /// URLs loaded so far.
    pub fn loaded(&self) -> Vec<String> {
        self.loaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl PageLoader for CountingPageLoader {
    async fn load(&self, url: &str) -> Option<String> {
        self.loaded
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(url.to_string());
        self.body.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use content_sources::HttpThumbnailResolver;
    use learning_core::{ContentType, ThumbnailResolver};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_deny_list() {
        let validator = DenyList::new(["https://dead.example.com/"]);

        assert!(!validator.is_valid("https://dead.example.com/").await);
        assert!(validator.is_valid("https://alive.example.com/").await);
        assert_eq!(validator.checks(), 2);
    }

    #[tokio::test]
    async fn test_counting_loader_feeds_resolver() {
        let loader = Arc::new(CountingPageLoader::with_og_image("https://cdn.example.com/og.png"));
        let resolver = HttpThumbnailResolver::new(loader.clone());

        let thumb = resolver
            .resolve("https://example.com/post", ContentType::Article)
            .await;

        assert_eq!(thumb.as_deref(), Some("https://cdn.example.com/og.png"));
        assert_eq!(loader.loaded(), vec!["https://example.com/post".to_string()]);
    }
}
