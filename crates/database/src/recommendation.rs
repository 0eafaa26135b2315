//! Per-employee recommendation sets.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DatabaseError, Result};
use crate::models::{NewRecommendation, Recommendation};

const RECOMMENDATION_COLUMNS: &str =
    "id, employee_id, title, url, thumbnail_url, content_type, reason, created_at, clicked_at";

/// Replace an employee's recommendations with a new batch.
///
/// The delete and the insert run in one transaction, so readers see either the
/// old set or the new one. The batch is written with a single statement and
/// every row shares one `created_at`.
pub async fn replace_for_employee(
    pool: &SqlitePool,
    employee_id: i64,
    batch: &[NewRecommendation],
) -> Result<Vec<Recommendation>> {
    let mut tx = pool.begin().await?;

    let deleted = sqlx::query("DELETE FROM recommendations WHERE employee_id = ?")
        .bind(employee_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if !batch.is_empty() {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO recommendations (employee_id, title, url, thumbnail_url, content_type, reason) ",
        );
        builder.push_values(batch, |mut row, rec| {
            row.push_bind(employee_id)
                .push_bind(&rec.title)
                .push_bind(&rec.url)
                .push_bind(&rec.thumbnail_url)
                .push_bind(&rec.content_type)
                .push_bind(&rec.reason);
        });
        builder.build().execute(&mut *tx).await?;
    }

    let sql = format!(
        "SELECT {} FROM recommendations WHERE employee_id = ? ORDER BY id",
        RECOMMENDATION_COLUMNS
    );
    let saved = sqlx::query_as::<_, Recommendation>(&sql)
        .bind(employee_id)
        .fetch_all(&mut *tx)
        .await?;

    tx.commit().await?;

    debug!(employee_id, deleted, inserted = saved.len(), "Replaced recommendations");

    Ok(saved)
}

/// All current recommendations for an employee, in insertion order.
pub async fn list_for_employee(pool: &SqlitePool, employee_id: i64) -> Result<Vec<Recommendation>> {
    let sql = format!(
        "SELECT {} FROM recommendations WHERE employee_id = ? ORDER BY id",
        RECOMMENDATION_COLUMNS
    );
    let recs = sqlx::query_as::<_, Recommendation>(&sql)
        .bind(employee_id)
        .fetch_all(pool)
        .await?;

    Ok(recs)
}

/// Creation time of the employee's current batch, if any.
pub async fn latest_generated_at(pool: &SqlitePool, employee_id: i64) -> Result<Option<String>> {
    let generated_at: Option<String> =
        sqlx::query_scalar("SELECT MAX(created_at) FROM recommendations WHERE employee_id = ?")
            .bind(employee_id)
            .fetch_one(pool)
            .await?;

    Ok(generated_at)
}

/// Mark a recommendation as clicked. Scoped to the owning employee.
pub async fn record_click(pool: &SqlitePool, employee_id: i64, recommendation_id: i64) -> Result<Recommendation> {
    let result = sqlx::query(
        r#"
        UPDATE recommendations
        SET clicked_at = strftime('%Y-%m-%d %H:%M:%f', 'now')
        WHERE id = ? AND employee_id = ?
        "#,
    )
    .bind(recommendation_id)
    .bind(employee_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Recommendation",
            id: recommendation_id.to_string(),
        });
    }

    let sql = format!("SELECT {} FROM recommendations WHERE id = ?", RECOMMENDATION_COLUMNS);
    let rec = sqlx::query_as::<_, Recommendation>(&sql)
        .bind(recommendation_id)
        .fetch_one(pool)
        .await?;

    Ok(rec)
}

/// Number of current recommendations per content type.
pub async fn count_by_type(pool: &SqlitePool, employee_id: i64) -> Result<Vec<(String, i64)>> {
    let counts = sqlx::query_as::<_, (String, i64)>(
        r#"
        SELECT content_type, COUNT(*)
        FROM recommendations
        WHERE employee_id = ?
        GROUP BY content_type
        ORDER BY content_type
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    Ok(counts)
}
