//! Storage for the agent pipeline: curated content and tutoring agents.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::{AgentRecommendation, ContentRecommendation, NewContentRecommendation};

/// Save curated items for an employee. Returns the number of rows written.
pub async fn insert_content(
    pool: &SqlitePool,
    employee_id: i64,
    items: &[NewContentRecommendation],
) -> Result<u64> {
    let mut tx = pool.begin().await?;
    let mut written = 0;

    for item in items {
        written += sqlx::query(
            r#"
            INSERT INTO content_recommendations
                (employee_id, content_type, skill, title, description, url, source)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(employee_id)
        .bind(&item.content_type)
        .bind(&item.skill)
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.url)
        .bind(&item.source)
        .execute(&mut *tx)
        .await?
        .rows_affected();
    }

    tx.commit().await?;
    Ok(written)
}

/// Curated items for an employee, newest first, optionally of one type.
pub async fn list_content(
    pool: &SqlitePool,
    employee_id: i64,
    content_type: Option<&str>,
) -> Result<Vec<ContentRecommendation>> {
    let items = sqlx::query_as::<_, ContentRecommendation>(
        r#"
        SELECT id, employee_id, content_type, skill, title, description, url, source, created_at
        FROM content_recommendations
        WHERE employee_id = ? AND (? IS NULL OR content_type = ?)
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(employee_id)
    .bind(content_type)
    .bind(content_type)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

/// Save an agent, replacing any earlier one with the same specialization.
pub async fn upsert_agent(
    pool: &SqlitePool,
    employee_id: i64,
    specialization: &str,
    name: &str,
    system_prompt: &str,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO agent_recommendations (employee_id, specialization, name, system_prompt)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(employee_id, specialization) DO UPDATE SET
            name = excluded.name,
            system_prompt = excluded.system_prompt,
            created_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
        "#,
    )
    .bind(employee_id)
    .bind(specialization)
    .bind(name)
    .bind(system_prompt)
    .execute(pool)
    .await?;

    Ok(())
}

/// Agents proposed for an employee, by name.
pub async fn list_agents(pool: &SqlitePool, employee_id: i64) -> Result<Vec<AgentRecommendation>> {
    let agents = sqlx::query_as::<_, AgentRecommendation>(
        r#"
        SELECT id, employee_id, specialization, name, system_prompt, created_at
        FROM agent_recommendations
        WHERE employee_id = ?
        ORDER BY name
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    Ok(agents)
}
