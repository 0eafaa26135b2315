//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An employee with their resolved profession and designation names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    pub id: i64,
    pub email: String,
    pub name: String,
    /// Profession name, if one is assigned.
    pub profession: Option<String>,
    pub designation_id: Option<i64>,
    /// Designation name, if one is assigned.
    pub designation: Option<String>,
}

/// A role within a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Designation {
    pub id: i64,
    pub name: String,
    pub department: String,
}

/// A versioned job description for a designation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct JobDescription {
    pub id: i64,
    pub designation_id: i64,
    pub job_description: String,
    pub version: i64,
    pub is_active: bool,
}

/// The configured next role for a designation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CareerPath {
    pub id: i64,
    pub from_designation_id: i64,
    pub from_designation: String,
    pub to_designation_id: i64,
    pub to_designation: String,
}

/// A persisted, explained recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Recommendation {
    pub id: i64,
    pub employee_id: i64,
    pub title: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    /// One of `article`, `video`, `course`.
    pub content_type: String,
    pub reason: String,
    /// Persistence time; shared by every row of a batch.
    pub created_at: String,
    pub clicked_at: Option<String>,
}

/// A recommendation staged for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecommendation {
    pub title: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub content_type: String,
    pub reason: String,
}

/// An article, video or course curated by the agent pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ContentRecommendation {
    pub id: i64,
    pub employee_id: i64,
    pub content_type: String,
    pub skill: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub created_at: String,
}

/// A curated item staged for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewContentRecommendation {
    pub content_type: String,
    pub skill: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
}

/// A specialized tutoring agent proposed for an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AgentRecommendation {
    pub id: i64,
    pub employee_id: i64,
    pub specialization: String,
    pub name: String,
    pub system_prompt: String,
    pub created_at: String,
}

/// A stored chat question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserQuestion {
    pub id: i64,
    pub employee_id: i64,
    pub content: String,
    pub created_at: String,
}
