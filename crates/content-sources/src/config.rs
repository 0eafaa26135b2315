//! Configuration for content sources.

use std::env;
use std::fmt;
use std::str::FromStr;

use learning_core::FetchError;

/// Default Google Programmable Search endpoint.
pub const DEFAULT_SEARCH_API_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default YouTube Data API endpoint.
pub const DEFAULT_VIDEO_SEARCH_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// How fetchers reach their content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStrategy {
    /// One web-grounded language model call per search.
    #[default]
    Grounded,
    /// Restricted-domain web search and video search APIs.
    Direct,
}

impl FromStr for FetchStrategy {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grounded" => Ok(FetchStrategy::Grounded),
            "direct" => Ok(FetchStrategy::Direct),
            other => Err(FetchError::Configuration(format!(
                "FETCH_STRATEGY must be 'grounded' or 'direct', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for FetchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStrategy::Grounded => f.write_str("grounded"),
            FetchStrategy::Direct => f.write_str("direct"),
        }
    }
}

/// Configuration for the content fetchers, link validator and thumbnail resolver.
#[derive(Debug, Clone)]
pub struct SourcesConfig {
    pub strategy: FetchStrategy,
    pub search_api_url: String,
    pub search_api_key: Option<String>,
    pub search_engine_id: Option<String>,
    pub video_search_api_url: String,
    pub video_search_api_key: Option<String>,
    /// Sites searched for articles in direct mode.
    pub article_domains: Vec<String>,
    /// Allow-listed course platforms.
    pub course_domains: Vec<String>,
    /// Timeout for link checks and page fetches.
    pub http_timeout_secs: u64,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            strategy: FetchStrategy::Grounded,
            search_api_url: DEFAULT_SEARCH_API_URL.to_string(),
            search_api_key: None,
            search_engine_id: None,
            video_search_api_url: DEFAULT_VIDEO_SEARCH_API_URL.to_string(),
            video_search_api_key: None,
            article_domains: to_list("medium.com,dev.to,hbr.org,freecodecamp.org,towardsdatascience.com"),
            course_domains: to_list("coursera.org,udemy.com,edx.org"),
            http_timeout_secs: 5,
        }
    }
}

fn to_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

fn non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl SourcesConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `FETCH_STRATEGY` | `grounded` |
    /// | `SEARCH_API_URL` | Google Programmable Search |
    /// | `SEARCH_API_KEY` / `SEARCH_ENGINE_ID` | none (required for `direct`) |
    /// | `VIDEO_SEARCH_API_URL` | YouTube Data API v3 |
    /// | `VIDEO_SEARCH_API_KEY` | none (required for `direct`) |
    /// | `ARTICLE_DOMAINS` | curated list |
    /// | `COURSE_DOMAINS` | `coursera.org,udemy.com,edx.org` |
    /// | `HTTP_CHECK_TIMEOUT_SECS` | `5` |
    pub fn from_env() -> Result<Self, FetchError> {
        let defaults = Self::default();

        let strategy = match non_empty("FETCH_STRATEGY") {
            Some(value) => value.parse()?,
            None => defaults.strategy,
        };

        let article_domains = non_empty("ARTICLE_DOMAINS")
            .map(|v| to_list(&v))
            .unwrap_or(defaults.article_domains);

        let course_domains = non_empty("COURSE_DOMAINS")
            .map(|v| to_list(&v))
            .unwrap_or(defaults.course_domains);

        let http_timeout_secs = env::var("HTTP_CHECK_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.http_timeout_secs);

        Ok(Self {
            strategy,
            search_api_url: non_empty("SEARCH_API_URL").unwrap_or(defaults.search_api_url),
            search_api_key: non_empty("SEARCH_API_KEY"),
            search_engine_id: non_empty("SEARCH_ENGINE_ID"),
            video_search_api_url: non_empty("VIDEO_SEARCH_API_URL")
                .unwrap_or(defaults.video_search_api_url),
            video_search_api_key: non_empty("VIDEO_SEARCH_API_KEY"),
            article_domains,
            course_domains,
            http_timeout_secs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SourcesConfig::default();
        assert_eq!(config.strategy, FetchStrategy::Grounded);
        assert_eq!(config.course_domains, vec!["coursera.org", "udemy.com", "edx.org"]);
        assert_eq!(config.http_timeout_secs, 5);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Direct".parse::<FetchStrategy>().unwrap(), FetchStrategy::Direct);
        assert!("scrape".parse::<FetchStrategy>().is_err());
    }

    #[test]
    fn test_from_env_scenarios() {
        use std::sync::Mutex;
        static ENV_LOCK: Mutex<()> = Mutex::new(());
        let _guard = ENV_LOCK.lock().unwrap();

        fn clear() {
            for key in [
                "FETCH_STRATEGY",
                "SEARCH_API_URL",
                "SEARCH_API_KEY",
                "SEARCH_ENGINE_ID",
                "VIDEO_SEARCH_API_URL",
                "VIDEO_SEARCH_API_KEY",
                "ARTICLE_DOMAINS",
                "COURSE_DOMAINS",
                "HTTP_CHECK_TIMEOUT_SECS",
            ] {
                env::remove_var(key);
            }
        }

        clear();
        let config = SourcesConfig::from_env().unwrap();
        assert_eq!(config.strategy, FetchStrategy::Grounded);
        assert!(config.search_api_key.is_none());

        clear();
        env::set_var("FETCH_STRATEGY", "direct");
        env::set_var("SEARCH_API_KEY", "k");
        env::set_var("COURSE_DOMAINS", " Coursera.org , ,pluralsight.com");
        env::set_var("HTTP_CHECK_TIMEOUT_SECS", "2");
        let config = SourcesConfig::from_env().unwrap();
        assert_eq!(config.strategy, FetchStrategy::Direct);
        assert_eq!(config.search_api_key.as_deref(), Some("k"));
        assert_eq!(config.course_domains, vec!["coursera.org", "pluralsight.com"]);
        assert_eq!(config.http_timeout_secs, 2);

        clear();
        env::set_var("FETCH_STRATEGY", "bogus");
        assert!(matches!(
            SourcesConfig::from_env(),
            Err(FetchError::Configuration(_))
        ));

        clear();
    }
}
