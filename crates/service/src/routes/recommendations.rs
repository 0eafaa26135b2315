//! Recommendation routes.

use aggregator::GenerationOutcome;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use database::{recommendation, Recommendation};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::identity::EmployeeId;
use crate::state::AppState;

/// How a generation run chooses what to look for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    /// Query every source with the profession.
    #[default]
    Profession,
    /// Follow the employee's next career step.
    Intent,
}

/// Request to generate recommendations.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateRequest {
    /// Overrides the profession on record.
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub mode: GenerationMode,
}

/// Current recommendations grouped by content type.
#[derive(Debug, Default, Serialize)]
pub struct GroupedRecommendations {
    pub articles: Vec<Recommendation>,
    pub videos: Vec<Recommendation>,
    pub courses: Vec<Recommendation>,
}

/// Read-back of an employee's current set.
#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub generated_at: Option<String>,
    pub recommendations: GroupedRecommendations,
}

/// Generate a fresh recommendation set for the caller.
///
/// An empty or missing body runs profession mode.
pub async fn generate(
    State(state): State<AppState>,
    EmployeeId(employee_id): EmployeeId,
    body: Option<Json<GenerateRequest>>,
) -> Result<(StatusCode, Json<GenerationOutcome>)> {
    let request = body.map(|Json(req)| req).unwrap_or_default();
    info!(employee_id, mode = ?request.mode, "Recommendation generation requested");

    let outcome = match request.mode {
        GenerationMode::Profession => {
            state
                .aggregator
                .generate_for_profession(employee_id, request.profession.as_deref())
                .await?
        }
        GenerationMode::Intent => state.aggregator.generate_for_career_path(employee_id).await?,
    };

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// The caller's current set, grouped by content type.
pub async fn list(
    State(state): State<AppState>,
    EmployeeId(employee_id): EmployeeId,
) -> Result<Json<RecommendationsResponse>> {
    let pool = state.db.pool();
    let generated_at = recommendation::latest_generated_at(pool, employee_id).await?;

    let mut grouped = GroupedRecommendations::default();
    for rec in recommendation::list_for_employee(pool, employee_id).await? {
        match rec.content_type.as_str() {
            "article" => grouped.articles.push(rec),
            "video" => grouped.videos.push(rec),
            "course" => grouped.courses.push(rec),
            _ => {}
        }
    }

    Ok(Json(RecommendationsResponse {
        generated_at,
        recommendations: grouped,
    }))
}

/// Record that the caller opened one of their recommendations.
pub async fn click(
    State(state): State<AppState>,
    EmployeeId(employee_id): EmployeeId,
    Path(recommendation_id): Path<i64>,
) -> Result<Json<Recommendation>> {
    let rec = recommendation::record_click(state.db.pool(), employee_id, recommendation_id).await?;
    Ok(Json(rec))
}
