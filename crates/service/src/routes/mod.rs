//! Route handlers for the GrowWise service.

pub mod agents;
pub mod health;
pub mod recommendations;

#[cfg(test)]
mod tests;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        // Recommendation sets
        .route("/recommendations", get(recommendations::list))
        .route("/recommendations/generate", post(recommendations::generate))
        .route("/recommendations/:id/click", post(recommendations::click))
        // Agent pipeline
        .route("/agents/generate", post(agents::generate))
        .route("/agents/suggestions", get(agents::suggestions))
        .route("/agents/content", get(agents::content))
        .layer(TraceLayer::new_for_http())
}
