use std::sync::Arc;

use aggregator::{AgentPipeline, AggregatorConfig, RecommendationAggregator};
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use content_sources::HttpThumbnailResolver;
use database::{employee, question, Database};
use learning_core::{ContentType, FetcherSet, Quotas};
use mock_sources::{AllowAll, CountingPageLoader, ScriptedModel, StaticFetcher};
use serde_json::Value;
use tower::ServiceExt;

use crate::state::AppState;

const AGENTS: &str = r#"[{"specialization": "SQL", "name": "SQL Tutor", "system_prompt": "Only SQL."}]"#;
const SUMMARY: &str = r#"{"summary": "Foundations for data work."}"#;
const VIDEOS: &str = r#"[{"topic": "SQL", "title": "SQL in 60 minutes", "description": "Crash course", "url": "https://www.youtube.com/watch?v=HXV3zeQKqGY"}]"#;
const ARTICLES: &str = r#"[{"topic": "SQL", "title": "Joins explained", "description": "Visual guide", "url": "https://mode.com/sql-tutorial/sql-joins"}]"#;

async fn test_db() -> Database {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    db.migrate().await.unwrap();
    db
}

fn app(db: &Database) -> Router {
    let model = Arc::new(
        ScriptedModel::new()
            .reply("Questions asked so far", AGENTS)
            .reply("Propose specialized", AGENTS)
            .reply("Selected resources", SUMMARY)
            .reply("YouTube videos", VIDEOS)
            .reply("high-quality articles", ARTICLES)
            .reply("online courses", "[]"),
    );

    let fetchers = FetcherSet::new(
        Arc::new(
            StaticFetcher::new(ContentType::Article)
                .with_item("Joins explained", "https://mode.com/sql-tutorial/sql-joins"),
        ),
        Arc::new(
            StaticFetcher::new(ContentType::Video)
                .with_item("SQL in 60 minutes", "https://www.youtube.com/watch?v=HXV3zeQKqGY"),
        ),
        Arc::new(
            StaticFetcher::new(ContentType::Course)
                .with_item("SQL for Data Science", "https://www.coursera.org/learn/sql-for-data-science"),
        ),
    );

    let config = AggregatorConfig::default().with_quotas(Quotas::new(1, 1, 1));
    let aggregator = RecommendationAggregator::new(
        db.clone(),
        model.clone(),
        fetchers,
        Arc::new(AllowAll),
        Arc::new(HttpThumbnailResolver::new(Arc::new(CountingPageLoader::unreachable()))),
    )
    .with_config(config.clone());
    let pipeline = AgentPipeline::new(db.clone(), model).with_config(config);

    crate::routes::router().with_state(AppState::new(db.clone(), aggregator, pipeline))
}

async fn new_employee(db: &Database) -> i64 {
    let profession = employee::create_profession(db.pool(), "Data Analyst").await.unwrap();
    employee::create_employee(db.pool(), "ada@example.com", "Ada", Some(profession), None)
        .await
        .unwrap()
}

fn request(method: &str, uri: &str, employee_id: Option<i64>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = employee_id {
        builder = builder.header("X-Employee-Id", id.to_string());
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health() {
    let db = test_db().await;
    let (status, body) = send(&app(&db), request("GET", "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "up");

    db.close().await;
    let (status, body) = send(&app(&db), request("GET", "/health", None, None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_missing_employee_header_is_rejected() {
    let db = test_db().await;
    let app = app(&db);

    let (status, body) = send(&app, request("POST", "/recommendations/generate", None, None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "X-Employee-Id header is required.");

    let req = Request::builder()
        .uri("/recommendations")
        .header("X-Employee-Id", "abc")
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_then_read_back_and_click() {
    let db = test_db().await;
    let app = app(&db);
    let id = new_employee(&db).await;

    let (status, body) = send(&app, request("POST", "/recommendations/generate", Some(id), None)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(body["suggested_agents"][0]["name"], "SQL Tutor");

    let (status, body) = send(&app, request("GET", "/recommendations", Some(id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["generated_at"].is_string());
    let grouped = &body["recommendations"];
    assert_eq!(grouped["articles"].as_array().unwrap().len(), 1);
    assert_eq!(grouped["videos"].as_array().unwrap().len(), 1);
    assert_eq!(grouped["courses"].as_array().unwrap().len(), 1);
    assert_eq!(grouped["courses"][0]["reason"], "Foundations for data work.");

    let rec_id = grouped["articles"][0]["id"].as_i64().unwrap();
    let uri = format!("/recommendations/{}/click", rec_id);
    let (status, body) = send(&app, request("POST", &uri, Some(id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["clicked_at"].is_string());

    // Another employee cannot click someone else's recommendation
    let (status, _) = send(&app, request("POST", &uri, Some(id + 1), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_read_back_before_any_run() {
    let db = test_db().await;
    let app = app(&db);
    let id = new_employee(&db).await;

    let (status, body) = send(&app, request("GET", "/recommendations", Some(id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["generated_at"].is_null());
    assert!(body["recommendations"]["articles"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_generate_for_unknown_employee() {
    let db = test_db().await;
    let (status, body) = send(
        &app(&db),
        request("POST", "/recommendations/generate", Some(404), Some(serde_json::json!({}))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Not found");
}

#[tokio::test]
async fn test_intent_mode_without_career_path_is_empty() {
    let db = test_db().await;
    let app = app(&db);
    let id = new_employee(&db).await;

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/recommendations/generate",
            Some(id),
            Some(serde_json::json!({"mode": "intent"})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
    assert!(body["suggested_agents"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_agent_pipeline_routes() {
    let db = test_db().await;
    let app = app(&db);
    let id = new_employee(&db).await;
    question::add_question(db.pool(), id, "How do joins work?").await.unwrap();

    let (status, body) = send(
        &app,
        request(
            "POST",
            "/agents/generate",
            Some(id),
            Some(serde_json::json!({"profession": "Data Analyst"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "success");
    assert_eq!(body["video_recommendations"], 1);
    assert_eq!(body["article_recommendations"], 1);
    assert_eq!(body["course_recommendations"], 0);
    assert_eq!(body["custom_agent_recommendations"], 1);

    let (status, body) = send(&app, request("GET", "/agents/suggestions", Some(id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "SQL Tutor");

    let (status, body) = send(&app, request("GET", "/agents/content?type=video", Some(id), None)).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["source"], "YouTube");

    let (status, body) = send(&app, request("GET", "/agents/content", Some(id), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, _) = send(&app, request("GET", "/agents/content?type=podcast", Some(id), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_agent_pipeline_requires_profession() {
    let db = test_db().await;
    let app = app(&db);
    let id = new_employee(&db).await;

    let (status, body) = send(
        &app,
        request("POST", "/agents/generate", Some(id), Some(serde_json::json!({"profession": "  "}))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Profession is required.");

    let (status, body) = send(&app, request("POST", "/agents/generate", Some(id), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Profession is required.");
}

#[tokio::test]
async fn test_closed_pool_is_service_unavailable() {
    let db = test_db().await;
    let app = app(&db);
    let id = new_employee(&db).await;
    db.close().await;

    let (status, body) = send(&app, request("GET", "/recommendations", Some(id), None)).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Database connection error");
}
