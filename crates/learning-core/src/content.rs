//! Content types, candidate items and per-type quotas.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed set of recommendation content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Article,
    Video,
    Course,
}

impl ContentType {
    /// All content types, in presentation order.
    pub const ALL: [ContentType; 3] = [ContentType::Article, ContentType::Video, ContentType::Course];

    /// Storage and wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Article => "article",
            ContentType::Video => "video",
            ContentType::Course => "course",
        }
    }

    /// Fallback title used when a source provides none.
    pub fn default_title(&self) -> &'static str {
        match self {
            ContentType::Article => "Article",
            ContentType::Video => "Video",
            ContentType::Course => "Course",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "article" | "articles" => Ok(ContentType::Article),
            "video" | "videos" => Ok(ContentType::Video),
            "course" | "courses" => Ok(ContentType::Course),
            other => Err(format!("unknown content type: {}", other)),
        }
    }
}

/// A candidate recommendation returned by a content fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateItem {
    /// Display title.
    pub title: String,
    /// Resource link.
    pub url: String,
    /// Publishing site or platform.
    pub source: String,
    /// Content type.
    #[serde(rename = "type")]
    pub content_type: ContentType,
    /// Preview image, when the source already knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl CandidateItem {
    /// Create a candidate without a thumbnail.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        source: impl Into<String>,
        content_type: ContentType,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            source: source.into(),
            content_type,
            thumbnail_url: None,
        }
    }

    /// Attach a thumbnail.
    pub fn with_thumbnail(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }
}

/// Maximum number of recommendations per content type in one generation batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quotas {
    pub article: usize,
    pub video: usize,
    pub course: usize,
}

impl Default for Quotas {
    fn default() -> Self {
        Self {
            article: 15,
            video: 5,
            course: 4,
        }
    }
}

impl Quotas {
    /// Create quotas from explicit values.
    pub fn new(article: usize, video: usize, course: usize) -> Self {
        Self {
            article,
            video,
            course,
        }
    }

    /// Quota for a single content type.
    pub fn for_type(&self, content_type: ContentType) -> usize {
        match content_type {
            ContentType::Article => self.article,
            ContentType::Video => self.video,
            ContentType::Course => self.course,
        }
    }

    /// Sum of all quotas.
    pub fn total(&self) -> usize {
        self.article + self.video + self.course
    }
}
