//! Agent pipeline routes.

use aggregator::PipelineReport;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use database::{agent_content, AgentRecommendation, ContentRecommendation};
use learning_core::ContentType;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ApiError, Result};
use crate::identity::EmployeeId;
use crate::state::AppState;

/// Request to run the agent pipeline.
#[derive(Debug, Default, Deserialize)]
pub struct AgentRunRequest {
    #[serde(default)]
    pub profession: String,
}

/// Result of a pipeline run.
#[derive(Debug, Serialize)]
pub struct AgentRunResponse {
    pub status: &'static str,
    #[serde(flatten)]
    pub report: PipelineReport,
}

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
}

/// Run the curation agents and the agent designer for the caller.
///
/// A missing body counts as a blank profession.
pub async fn generate(
    State(state): State<AppState>,
    EmployeeId(employee_id): EmployeeId,
    body: Option<Json<AgentRunRequest>>,
) -> Result<(StatusCode, Json<AgentRunResponse>)> {
    let request = body.map(|Json(req)| req).unwrap_or_default();
    info!(employee_id, profession = %request.profession, "Agent pipeline requested");

    let report = state.pipeline.run(employee_id, &request.profession).await?;

    Ok((
        StatusCode::CREATED,
        Json(AgentRunResponse {
            status: "success",
            report,
        }),
    ))
}

/// Agents designed for the caller.
pub async fn suggestions(
    State(state): State<AppState>,
    EmployeeId(employee_id): EmployeeId,
) -> Result<Json<Vec<AgentRecommendation>>> {
    let agents = agent_content::list_agents(state.db.pool(), employee_id).await?;
    Ok(Json(agents))
}

/// Curated content for the caller, optionally of one type.
pub async fn content(
    State(state): State<AppState>,
    EmployeeId(employee_id): EmployeeId,
    Query(query): Query<ContentQuery>,
) -> Result<Json<Vec<ContentRecommendation>>> {
    let content_type = query
        .content_type
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(|t| t.parse::<ContentType>().map_err(ApiError::BadRequest))
        .transpose()?;

    let items = agent_content::list_content(
        state.db.pool(),
        employee_id,
        content_type.as_ref().map(ContentType::as_str),
    )
    .await?;

    Ok(Json(items))
}
