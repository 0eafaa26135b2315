//! Database error types.

use thiserror::Error;

/// Errors that can occur during database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// SQLx error (connection, query, etc.)
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// Migration error
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Record not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Record already exists
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },
}

impl DatabaseError {
    /// True when the store itself is unreachable rather than the query being wrong.
    pub fn is_unavailable(&self) -> bool {
        match self {
            DatabaseError::Sqlx(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut
                    | sqlx::Error::PoolClosed
                    | sqlx::Error::Io(_)
                    | sqlx::Error::Tls(_)
                    | sqlx::Error::Protocol(_)
                    | sqlx::Error::WorkerCrashed
            ) || self.is_busy(),
            _ => false,
        }
    }

    /// True when no pooled connection could be acquired in time.
    pub fn is_pool_exhausted(&self) -> bool {
        match self {
            DatabaseError::Sqlx(sqlx::Error::PoolTimedOut) => true,
            DatabaseError::Sqlx(sqlx::Error::PoolClosed) => false,
            DatabaseError::Sqlx(e) => {
                let message = e.to_string().to_lowercase();
                message.contains("max clients") || message.contains("pool")
            }
            _ => false,
        }
    }

    fn is_busy(&self) -> bool {
        match self {
            DatabaseError::Sqlx(sqlx::Error::Database(db_err)) => {
                // SQLITE_BUSY and SQLITE_LOCKED, including extended codes
                let primary = db_err
                    .code()
                    .and_then(|code| code.parse::<i32>().ok())
                    .map(|code| code & 0xff);
                matches!(primary, Some(5) | Some(6))
            }
            _ => false,
        }
    }

    pub(crate) fn map_unique(entity: &'static str, id: impl Into<String>) -> impl FnOnce(sqlx::Error) -> Self {
        let id = id.into();
        move |e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.is_unique_violation() {
                    return DatabaseError::AlreadyExists { entity, id };
                }
            }
            DatabaseError::Sqlx(e)
        }
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
