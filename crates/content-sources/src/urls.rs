//! URL helpers shared by the fetchers.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Hosts that serve playable videos.
pub const VIDEO_HOSTS: [&str; 2] = ["youtube.com", "youtu.be"];

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"https?://[^\s)\]>"'<]+"#).expect("valid regex")
});

static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/(?:watch\?(?:.*&)?v=|embed/)|youtu\.be/)([A-Za-z0-9_-]{11})")
        .expect("valid regex")
});

/// Extract every `http(s)://` URL from a line of model output, in order.
///
/// Trailing sentence punctuation is not part of the URL.
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL_RE
        .find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', '*']))
        .filter(|url| !url.ends_with("://"))
        .collect()
}

/// Lowercased host with any leading `www.` removed.
pub fn normalized_host(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_ascii_lowercase();
    Some(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
}

/// Display source for a URL: its host without `www.`, or empty.
pub fn source_from_url(url: &str) -> String {
    normalized_host(url).unwrap_or_default()
}

/// True when the URL's host is `domain` or a subdomain of it.
pub fn host_matches(url: &str, domain: &str) -> bool {
    let Some(host) = normalized_host(url) else {
        return false;
    };
    let domain = domain.trim().trim_start_matches("www.").to_ascii_lowercase();
    host == domain || host.ends_with(&format!(".{}", domain))
}

/// True when the URL's host is one of `domains`.
pub fn host_in(url: &str, domains: &[String]) -> bool {
    domains.iter().any(|d| host_matches(url, d))
}

/// True for URLs on a known video host.
pub fn is_video_url(url: &str) -> bool {
    VIDEO_HOSTS.iter().any(|d| host_matches(url, d))
}

/// Canonical YouTube video id for watch, short-link and embed URLs.
pub fn youtube_video_id(url: &str) -> Option<String> {
    if !is_video_url(url) {
        return None;
    }
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
}

/// Deterministic preview image for a YouTube video id.
pub fn youtube_thumbnail(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}
