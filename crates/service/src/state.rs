//! Application state shared across handlers.

use std::sync::Arc;

use aggregator::{AgentPipeline, RecommendationAggregator};
use database::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Recommendation generation.
    pub aggregator: Arc<RecommendationAggregator>,
    /// Curation agents and agent designer.
    pub pipeline: Arc<AgentPipeline>,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, aggregator: RecommendationAggregator, pipeline: AgentPipeline) -> Self {
        Self {
            db,
            aggregator: Arc::new(aggregator),
            pipeline: Arc::new(pipeline),
        }
    }
}
