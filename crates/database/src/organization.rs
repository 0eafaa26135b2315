//! Designations, job descriptions and career paths.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{CareerPath, Designation, JobDescription};

/// Create a designation, returning its ID.
pub async fn create_designation(pool: &SqlitePool, name: &str, department: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO designations (name, department) VALUES (?, ?)")
        .bind(name)
        .bind(department)
        .execute(pool)
        .await
        .map_err(DatabaseError::map_unique("Designation", format!("{} ({})", name, department)))?;

    Ok(result.last_insert_rowid())
}

/// Get a designation by ID.
pub async fn get_designation(pool: &SqlitePool, id: i64) -> Result<Designation> {
    sqlx::query_as::<_, Designation>("SELECT id, name, department FROM designations WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Designation",
            id: id.to_string(),
        })
}

/// Add a job description version, returning its ID.
pub async fn add_job_description(
    pool: &SqlitePool,
    designation_id: i64,
    job_description: &str,
    version: i64,
    is_active: bool,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO job_descriptions (designation_id, job_description, version, is_active)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(designation_id)
    .bind(job_description)
    .bind(version)
    .bind(is_active)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Highest-version active job description for a designation.
pub async fn latest_active_job_description(
    pool: &SqlitePool,
    designation_id: i64,
) -> Result<Option<JobDescription>> {
    let jd = sqlx::query_as::<_, JobDescription>(
        r#"
        SELECT id, designation_id, job_description, version, is_active
        FROM job_descriptions
        WHERE designation_id = ? AND is_active = 1
        ORDER BY version DESC, id DESC
        LIMIT 1
        "#,
    )
    .bind(designation_id)
    .fetch_optional(pool)
    .await?;

    Ok(jd)
}

/// Add a career path between two designations, returning its ID.
pub async fn add_career_path(pool: &SqlitePool, from_designation_id: i64, to_designation_id: i64) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO career_paths (from_designation_id, to_designation_id) VALUES (?, ?)",
    )
    .bind(from_designation_id)
    .bind(to_designation_id)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// The configured career path out of a designation (first one, if several exist).
pub async fn career_path_from(pool: &SqlitePool, designation_id: i64) -> Result<Option<CareerPath>> {
    let path = sqlx::query_as::<_, CareerPath>(
        r#"
        SELECT cp.id,
               cp.from_designation_id,
               f.name AS from_designation,
               cp.to_designation_id,
               t.name AS to_designation
        FROM career_paths cp
        JOIN designations f ON f.id = cp.from_designation_id
        JOIN designations t ON t.id = cp.to_designation_id
        WHERE cp.from_designation_id = ?
        ORDER BY cp.id
        LIMIT 1
        "#,
    )
    .bind(designation_id)
    .fetch_optional(pool)
    .await?;

    Ok(path)
}
