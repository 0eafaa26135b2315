//! Preview image lookup.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use learning_core::{ContentType, FetchError, ThumbnailResolver};
use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;

use crate::urls::{youtube_thumbnail, youtube_video_id};

/// Loads a page body for metadata extraction.
#[async_trait]
pub trait PageLoader: Send + Sync {
    /// Body of the page, or `None` on any failure.
    async fn load(&self, url: &str) -> Option<String>;
}

/// Plain HTTP GET page loader.
#[derive(Clone)]
pub struct HttpPageLoader {
    client: Client,
}

impl HttpPageLoader {
    pub fn new(timeout_secs: u64) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent("Mozilla/5.0 (compatible; GrowWiseBot/1.0)")
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl PageLoader for HttpPageLoader {
    async fn load(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url, "Page load failed: {}", e);
                return None;
            }
        };
        if !response.status().is_success() {
            debug!(url, status = %response.status(), "Page load returned an error status");
            return None;
        }
        response.text().await.ok()
    }
}

/// `og:image` content from an HTML document.
pub fn og_image(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(r#"meta[property="og:image"]"#).ok()?;

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("content"))
        .map(str::trim)
        .find(|content| !content.is_empty())
        .map(str::to_string)
}

/// Thumbnails derived from the video id for videos, and from the page's
/// `og:image` tag for everything else.
pub struct HttpThumbnailResolver {
    loader: Arc<dyn PageLoader>,
}

impl HttpThumbnailResolver {
    pub fn new(loader: Arc<dyn PageLoader>) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl ThumbnailResolver for HttpThumbnailResolver {
    async fn resolve(&self, url: &str, content_type: ContentType) -> Option<String> {
        if content_type == ContentType::Video {
            return youtube_video_id(url).map(|id| youtube_thumbnail(&id));
        }

        let body = self.loader.load(url).await?;
        og_image(&body)
    }
}
