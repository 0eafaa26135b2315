//! Fetchers backed by a web-grounded language model.
//!
//! Each search is one grounded completion. Citation URLs come first; URLs
//! parsed out of the response text only top up the list when citations
//! yield fewer than `limit` items.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use learning_core::{
    CandidateItem, Completion, CompletionRequest, ContentFetcher, ContentType, FetchError,
    Grounding, LanguageModel,
};
use tracing::debug;

use crate::urls::{extract_urls, host_in, is_video_url, source_from_url, youtube_thumbnail, youtube_video_id};

const SEARCH_TEMPERATURE: f32 = 0.7;

/// A [`ContentFetcher`] that asks a grounded model for resources of one type.
pub struct GroundedFetcher {
    model: Arc<dyn LanguageModel>,
    content_type: ContentType,
    allowed_domains: Vec<String>,
    name: String,
}

impl GroundedFetcher {
    /// Articles from anywhere on the web.
    pub fn articles(model: Arc<dyn LanguageModel>) -> Self {
        Self::new(model, ContentType::Article, Vec::new())
    }

    /// YouTube videos.
    pub fn videos(model: Arc<dyn LanguageModel>) -> Self {
        let hosts = crate::urls::VIDEO_HOSTS.iter().map(|h| h.to_string()).collect();
        Self::new(model, ContentType::Video, hosts)
    }

    /// Courses from the allow-listed platforms only.
    pub fn courses(model: Arc<dyn LanguageModel>, course_domains: Vec<String>) -> Self {
        Self::new(model, ContentType::Course, course_domains)
    }

    fn new(model: Arc<dyn LanguageModel>, content_type: ContentType, allowed_domains: Vec<String>) -> Self {
        let name = format!("Grounded{}Fetcher", content_type.default_title());
        Self {
            model,
            content_type,
            allowed_domains,
            name,
        }
    }

    fn prompt(&self, query: &str) -> String {
        match self.content_type {
            ContentType::Article => format!(
                "Search for articles and blog posts related to: {}\n\n\
                 For each article found, provide its title, URL and source site \
                 on a single line. Return the information in a clear format.",
                query
            ),
            ContentType::Video => format!(
                "Search for YouTube videos related to: {}\n\n\
                 For each video found, provide its title and YouTube video link \
                 on a single line. Return the information in a clear format.",
                query
            ),
            ContentType::Course => format!(
                "Search for online courses related to: {}\n\n\
                 Only include courses hosted on: {}.\n\
                 For each course found, provide its title, URL and platform \
                 on a single line. Return the information in a clear format.",
                query,
                self.allowed_domains.join(", ")
            ),
        }
    }

    fn accepts(&self, url: &str) -> bool {
        match self.content_type {
            ContentType::Article => true,
            ContentType::Video => is_video_url(url),
            ContentType::Course => host_in(url, &self.allowed_domains),
        }
    }

    fn to_item(&self, title: Option<&str>, url: &str) -> CandidateItem {
        let title = title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(self.content_type.default_title());

        match self.content_type {
            ContentType::Video => {
                let item = CandidateItem::new(title, url, "youtube", ContentType::Video);
                match youtube_video_id(url) {
                    Some(id) => item.with_thumbnail(youtube_thumbnail(&id)),
                    None => item,
                }
            }
            content_type => CandidateItem::new(title, url, source_from_url(url), content_type),
        }
    }

    /// Turn a grounded completion into at most `limit` distinct candidates.
    pub fn collect(&self, completion: &Completion, limit: usize) -> Vec<CandidateItem> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for citation in &completion.citations {
            if items.len() >= limit {
                break;
            }
            if self.accepts(&citation.url) && seen.insert(citation.url.clone()) {
                items.push(self.to_item(citation.title.as_deref(), &citation.url));
            }
        }

        let from_citations = items.len();

        'lines: for line in completion.text.lines() {
            for url in extract_urls(line) {
                if items.len() >= limit {
                    break 'lines;
                }
                if self.accepts(url) && seen.insert(url.to_string()) {
                    items.push(self.to_item(Some(&title_before(line, url)), url));
                }
            }
        }

        debug!(
            fetcher = %self.name,
            from_citations,
            from_text = items.len() - from_citations,
            "Collected grounded candidates"
        );

        items
    }
}

/// Text that precedes `url` on a line, minus list markers and separators.
fn title_before(line: &str, url: &str) -> String {
    let before = line.split(url).next().unwrap_or_default().trim();
    strip_list_marker(before)
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, '-' | ':' | '(' | '[' | '|' | '<'))
        .trim_matches(|c: char| c == '*' || c.is_whitespace())
        .to_string()
}

fn strip_list_marker(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix(['-', '*', '•']) {
        return rest.trim_start();
    }
    let digits = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    if digits > 0 {
        if let Some(rest) = text[digits..].strip_prefix(['.', ')']) {
            return rest.trim_start();
        }
    }
    text
}

#[async_trait]
impl ContentFetcher for GroundedFetcher {
    async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<CandidateItem>, FetchError> {
        let mut grounding = Grounding::web();
        if self.content_type == ContentType::Course {
            grounding.allowed_domains = self.allowed_domains.clone();
        }

        let request = CompletionRequest::new(self.prompt(query))
            .with_temperature(SEARCH_TEMPERATURE)
            .with_grounding(grounding);

        let completion = self.model.complete(request).await?;
        Ok(self.collect(&completion, limit))
    }

    fn content_type(&self) -> ContentType {
        self.content_type
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use learning_core::{Citation, LlmError};

    struct Unused;

    #[async_trait]
    impl LanguageModel for Unused {
        async fn complete(&self, _request: CompletionRequest) -> Result<Completion, LlmError> {
            Err(LlmError::Network("offline".to_string()))
        }

        fn name(&self) -> &str {
            "Unused"
        }
    }

    fn model() -> Arc<dyn LanguageModel> {
        Arc::new(Unused)
    }

    #[test]
    fn test_citations_precede_text_and_dedup() {
        let fetcher = GroundedFetcher::articles(model());
        let completion = Completion::text(
            "1. Data cleaning guide - https://example.com/a\n\
             2. Pandas tips: https://blog.dev/pandas\n\
             3. More https://other.io/x",
        )
        .with_citations(vec![
            Citation::new("https://example.com/a").with_title("Cleaning data"),
            Citation::new("https://www.kdnuggets.com/b"),
        ]);

        let items = fetcher.collect(&completion, 3);
        let urls: Vec<_> = items.iter().map(|i| i.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://example.com/a", "https://www.kdnuggets.com/b", "https://blog.dev/pandas"]
        );
        assert_eq!(items[0].title, "Cleaning data");
        assert_eq!(items[1].title, "Article");
        assert_eq!(items[1].source, "kdnuggets.com");
        assert_eq!(items[2].title, "Pandas tips");
    }

    #[test]
    fn test_text_not_parsed_when_citations_fill_limit() {
        let fetcher = GroundedFetcher::articles(model());
        let completion = Completion::text("Extra https://text.example/1")
            .with_citations(vec![Citation::new("https://cited.example/1")]);

        let items = fetcher.collect(&completion, 1);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://cited.example/1");
    }

    #[test]
    fn test_video_fetcher_keeps_video_hosts_with_thumbnails() {
        let fetcher = GroundedFetcher::videos(model());
        let completion = Completion::text("SQL in 100 seconds https://youtu.be/zsjvFFKOm3c")
            .with_citations(vec![
                Citation::new("https://vimeo.com/1"),
                Citation::new("https://www.youtube.com/watch?v=HXV3zeQKqGY").with_title("SQL Tutorial"),
            ]);

        let items = fetcher.collect(&completion, 5);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].source, "youtube");
        assert_eq!(
            items[0].thumbnail_url.as_deref(),
            Some("https://img.youtube.com/vi/HXV3zeQKqGY/hqdefault.jpg")
        );
        assert_eq!(items[1].title, "SQL in 100 seconds");
    }

    #[test]
    fn test_course_fetcher_allow_list() {
        let fetcher = GroundedFetcher::courses(model(), vec!["coursera.org".to_string()]);
        let completion = Completion::text(
            "- Course A: https://www.coursera.org/learn/a\n- Course B: https://random.site/b",
        );

        let items = fetcher.collect(&completion, 5);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Course A");
        assert_eq!(items[0].source, "coursera.org");
    }

    #[tokio::test]
    async fn test_model_failure_degrades_to_empty() {
        let fetcher = GroundedFetcher::articles(model());
        assert!(fetcher.search("Data Analyst", 5).await.is_empty());
    }
}
