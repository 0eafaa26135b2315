//! Chat question history.

use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::UserQuestion;

/// Record a question asked by an employee, returning its ID.
pub async fn add_question(pool: &SqlitePool, employee_id: i64, content: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO user_questions (employee_id, content) VALUES (?, ?)")
        .bind(employee_id)
        .bind(content)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// The most recent `limit` questions, oldest first.
pub async fn recent_questions(pool: &SqlitePool, employee_id: i64, limit: i64) -> Result<Vec<UserQuestion>> {
    let mut questions = sqlx::query_as::<_, UserQuestion>(
        r#"
        SELECT id, employee_id, content, created_at
        FROM user_questions
        WHERE employee_id = ?
        ORDER BY id DESC
        LIMIT ?
        "#,
    )
    .bind(employee_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    questions.reverse();
    Ok(questions)
}
