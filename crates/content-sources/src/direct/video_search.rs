//! Video search (YouTube Data API v3).

use std::time::Duration;

use async_trait::async_trait;
use learning_core::{CandidateItem, ContentFetcher, ContentType, FetchError};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::urls::youtube_thumbnail;

const MAX_RESULTS_PER_REQUEST: usize = 50;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoId,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct VideoId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
}

/// Videos from a single global video search call.
pub struct VideoSearchFetcher {
    client: Client,
    api_url: String,
    api_key: String,
}

impl VideoSearchFetcher {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| FetchError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl ContentFetcher for VideoSearchFetcher {
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, FetchError> {
        let url = format!("{}/search", self.api_url.trim_end_matches('/'));
        let max_results = limit.clamp(1, MAX_RESULTS_PER_REQUEST).to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        debug!(count = body.items.len(), "Video search returned results");

        Ok(body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let title = if item.snippet.title.trim().is_empty() {
                    ContentType::Video.default_title().to_string()
                } else {
                    item.snippet.title
                };
                // API thumbnail URLs vary by size and CDN; the stored one is built from the id
                let thumbnail = youtube_thumbnail(&video_id);

                Some(
                    CandidateItem::new(
                        title,
                        format!("https://www.youtube.com/watch?v={}", video_id),
                        "youtube",
                        ContentType::Video,
                    )
                    .with_thumbnail(thumbnail),
                )
            })
            .collect())
    }

    fn content_type(&self) -> ContentType {
        ContentType::Video
    }

    fn name(&self) -> &str {
        "VideoSearchFetcher"
    }
}
