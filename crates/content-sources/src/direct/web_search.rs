//! Restricted-domain web search (Google Programmable Search JSON API).

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use learning_core::{CandidateItem, ContentFetcher, ContentType, FetchError};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::urls::source_from_url;

/// The API never returns more than this many results per request.
const MAX_RESULTS_PER_REQUEST: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    #[serde(default)]
    title: String,
    link: String,
    #[serde(rename = "displayLink")]
    display_link: Option<String>,
}

/// Thin client for a site-restricted web search API.
#[derive(Clone)]
pub struct WebSearchClient {
    client: Client,
    api_url: String,
    api_key: String,
    engine_id: String,
}

impl WebSearchClient {
    pub fn new(
        api_url: impl Into<String>,
        api_key: impl Into<String>,
        engine_id: impl Into<String>,
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
            engine_id: engine_id.into(),
        })
    }

    /// Search one site, mapping raw results to candidates of `content_type`.
    pub async fn search_site(
        &self,
        query: &str,
        domain: &str,
        limit: usize,
        content_type: ContentType,
    ) -> Result<Vec<CandidateItem>, FetchError> {
        let num = limit.clamp(1, MAX_RESULTS_PER_REQUEST).to_string();

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.engine_id.as_str()),
                ("q", query),
                ("siteSearch", domain),
                ("num", num.as_str()),
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

        debug!(domain, count = body.items.len(), "Web search returned results");

        Ok(body
            .items
            .into_iter()
            .map(|item| {
                let source = item
                    .display_link
                    .map(|d| d.trim_start_matches("www.").to_string())
                    .unwrap_or_else(|| source_from_url(&item.link));
                let title = if item.title.trim().is_empty() {
                    content_type.default_title().to_string()
                } else {
                    item.title
                };
                CandidateItem::new(title, item.link, source, content_type)
            })
            .collect())
    }
}

/// Articles or courses found by searching each allowed domain once.
pub struct DomainSearchFetcher {
    client: WebSearchClient,
    domains: Vec<String>,
    content_type: ContentType,
    name: String,
}

impl DomainSearchFetcher {
    pub fn articles(client: WebSearchClient, domains: Vec<String>) -> Self {
        Self::new(client, domains, ContentType::Article)
    }

    pub fn courses(client: WebSearchClient, domains: Vec<String>) -> Self {
        Self::new(client, domains, ContentType::Course)
    }

    fn new(client: WebSearchClient, domains: Vec<String>, content_type: ContentType) -> Self {
        Self {
            client,
            domains,
            name: format!("DomainSearch{}Fetcher", content_type.default_title()),
            content_type,
        }
    }
}

#[async_trait]
impl ContentFetcher for DomainSearchFetcher {
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, FetchError> {
        if self.domains.is_empty() {
            return Err(FetchError::Configuration(format!(
                "no domains configured for {}",
                self.name
            )));
        }

        let searches = self
            .domains
            .iter()
            .map(|domain| self.client.search_site(query, domain, limit, self.content_type));
        let results = join_all(searches).await;

        let mut seen = HashSet::new();
        let mut items = Vec::new();
        let mut first_error = None;
        let mut failures = 0;

        for (domain, result) in self.domains.iter().zip(results) {
            match result {
                Ok(found) => {
                    for item in found {
                        if items.len() < limit && seen.insert(item.url.clone()) {
                            items.push(item);
                        }
                    }
                }
                Err(e) => {
                    warn!(fetcher = %self.name, domain = %domain, "Domain search failed: {}", e);
                    failures += 1;
                    first_error.get_or_insert(e);
                }
            }
        }

        // Only an outright failure is an error; partial results are kept.
        match first_error {
            Some(e) if failures == self.domains.len() => Err(e),
            _ => Ok(items),
        }
    }

    fn content_type(&self) -> ContentType {
        self.content_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}
