//! Employee lookups.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::Employee;

const EMPLOYEE_SELECT: &str = r#"
    SELECT e.id, e.email, e.name,
           p.name AS profession,
           e.designation_id,
           d.name AS designation
    FROM employees e
    LEFT JOIN professions p ON p.id = e.profession_id
    LEFT JOIN designations d ON d.id = e.designation_id
"#;

/// Create an employee, returning its ID.
pub async fn create_employee(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    profession_id: Option<i64>,
    designation_id: Option<i64>,
) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO employees (email, name, profession_id, designation_id)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(email)
    .bind(name)
    .bind(profession_id)
    .bind(designation_id)
    .execute(pool)
    .await
    .map_err(DatabaseError::map_unique("Employee", email))?;

    Ok(result.last_insert_rowid())
}

/// Get an employee by ID, with profession and designation names resolved.
pub async fn get_employee(pool: &SqlitePool, id: i64) -> Result<Employee> {
    let sql = format!("{} WHERE e.id = ?", EMPLOYEE_SELECT);
    sqlx::query_as::<_, Employee>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| DatabaseError::NotFound {
            entity: "Employee",
            id: id.to_string(),
        })
}

/// Create a profession, returning its ID.
pub async fn create_profession(pool: &SqlitePool, name: &str) -> Result<i64> {
    let result = sqlx::query("INSERT INTO professions (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await
        .map_err(DatabaseError::map_unique("Profession", name))?;

    Ok(result.last_insert_rowid())
}

/// Assign a profession to an employee.
pub async fn set_profession(pool: &SqlitePool, employee_id: i64, profession_id: Option<i64>) -> Result<()> {
    let result = sqlx::query("UPDATE employees SET profession_id = ? WHERE id = ?")
        .bind(profession_id)
        .bind(employee_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Employee",
            id: employee_id.to_string(),
        });
    }

    Ok(())
}

/// Record that an employee visited the application.
pub async fn touch_last_visited(pool: &SqlitePool, employee_id: i64) -> Result<()> {
    sqlx::query("UPDATE employees SET last_visited_at = CURRENT_TIMESTAMP WHERE id = ?")
        .bind(employee_id)
        .execute(pool)
        .await?;

    Ok(())
}
