//! Content sources for the GrowWise recommendation pipeline.
//!
//! This crate provides the concrete [`ContentFetcher`] implementations along
//! with link validation and thumbnail lookup.
//!
//! # Strategies
//!
//! The strategy is chosen once per deployment with `FETCH_STRATEGY`:
//!
//! - [`FetchStrategy::Grounded`] - [`GroundedFetcher`] asks a web-grounded
//!   language model and trusts its citation metadata first.
//! - [`FetchStrategy::Direct`] - [`DomainSearchFetcher`] runs one
//!   site-restricted web search per allowed domain (articles, courses) and
//!   [`VideoSearchFetcher`] one video search.
//!
//! # Example
//!
//! ```rust,ignore
//! use content_sources::{build_fetchers, SourcesConfig};
//!
//! let config = SourcesConfig::from_env()?;
//! let fetchers = build_fetchers(&config, model)?;
//! let videos = fetchers.video.search("Data Analyst", 5).await;
//! ```

mod config;
pub mod direct;
mod grounded;
mod thumbnail;
pub mod urls;
mod validator;

use std::sync::Arc;

use learning_core::{FetchError, FetcherSet, LanguageModel};
use tracing::info;

pub use config::{FetchStrategy, SourcesConfig};
pub use direct::{DomainSearchFetcher, VideoSearchFetcher, WebSearchClient};
pub use grounded::GroundedFetcher;
pub use thumbnail::{og_image, HttpPageLoader, HttpThumbnailResolver, PageLoader};
pub use validator::HttpUrlValidator;

// Re-export learning-core types for convenience
pub use learning_core::{CandidateItem, ContentFetcher, ContentType, ThumbnailResolver, UrlValidator};

fn required(value: &Option<String>, key: &str) -> Result<String, FetchError> {
    value
        .clone()
        .ok_or_else(|| FetchError::Configuration(format!("{} is required for direct search", key)))
}

/// Build the fetcher for each content type according to the configured strategy.
pub fn build_fetchers(
    config: &SourcesConfig,
    model: Arc<dyn LanguageModel>,
) -> Result<FetcherSet, FetchError> {
    info!(strategy = %config.strategy, "Building content fetchers");

    match config.strategy {
        FetchStrategy::Grounded => Ok(FetcherSet::new(
            Arc::new(GroundedFetcher::articles(model.clone())),
            Arc::new(GroundedFetcher::videos(model.clone())),
            Arc::new(GroundedFetcher::courses(model, config.course_domains.clone())),
        )),
        FetchStrategy::Direct => {
            let web = WebSearchClient::new(
                config.search_api_url.clone(),
                required(&config.search_api_key, "SEARCH_API_KEY")?,
                required(&config.search_engine_id, "SEARCH_ENGINE_ID")?,
                config.http_timeout_secs.max(10),
            )?;
            let video = VideoSearchFetcher::new(
                config.video_search_api_url.clone(),
                required(&config.video_search_api_key, "VIDEO_SEARCH_API_KEY")?,
                config.http_timeout_secs.max(10),
            )?;

            Ok(FetcherSet::new(
                Arc::new(DomainSearchFetcher::articles(web.clone(), config.article_domains.clone())),
                Arc::new(video),
                Arc::new(DomainSearchFetcher::courses(web, config.course_domains.clone())),
            ))
        }
    }
}

/// Default link validator and thumbnail resolver for a configuration.
pub fn build_enrichers(
    config: &SourcesConfig,
) -> Result<(Arc<dyn UrlValidator>, Arc<dyn ThumbnailResolver>), FetchError> {
    let validator = HttpUrlValidator::new(config.http_timeout_secs)?;
    let loader = HttpPageLoader::new(config.http_timeout_secs)?;
    Ok((
        Arc::new(validator),
        Arc::new(HttpThumbnailResolver::new(Arc::new(loader))),
    ))
}
