//! GrowWise HTTP service.
//!
//! Serves recommendation generation, read-back and click tracking, plus the
//! agent pipeline, over a JSON API.

mod config;
mod error;
mod identity;
mod routes;
mod state;

use std::sync::Arc;

use aggregator::{AgentPipeline, AggregatorConfig, RecommendationAggregator};
use content_sources::SourcesConfig;
use database::Database;
use grok_client::GrokClient;
use learning_core::LanguageModel;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting GrowWise service");

    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let model: Arc<dyn LanguageModel> = Arc::new(GrokClient::from_env()?);

    let sources = SourcesConfig::from_env()?;
    let fetchers = content_sources::build_fetchers(&sources, model.clone())?;
    let (validator, thumbnails) = content_sources::build_enrichers(&sources)?;

    let aggregator_config = AggregatorConfig::from_env();
    info!(
        article = aggregator_config.quotas.article,
        video = aggregator_config.quotas.video,
        course = aggregator_config.quotas.course,
        "Recommendation quotas"
    );

    let aggregator =
        RecommendationAggregator::new(db.clone(), model.clone(), fetchers, validator, thumbnails)
            .with_config(aggregator_config.clone());
    let pipeline = AgentPipeline::new(db.clone(), model).with_config(aggregator_config);

    let state = AppState::new(db, aggregator, pipeline);
    let app = routes::router().with_state(state);

    info!(addr = %config.addr, "GrowWise service listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
