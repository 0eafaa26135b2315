//! SQLite persistence layer for GrowWise.
//!
//! This crate provides async database operations for employees, the
//! organization structure, recommendation sets and the agent pipeline's
//! output using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{Database, models::NewRecommendation, recommendation};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:growwise.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let batch = vec![NewRecommendation {
//!         title: "SQL basics".to_string(),
//!         url: "https://www.coursera.org/learn/sql".to_string(),
//!         thumbnail_url: None,
//!         content_type: "course".to_string(),
//!         reason: "Core skill for analysts.".to_string(),
//!     }];
//!     recommendation::replace_for_employee(db.pool(), 1, &batch).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod agent_content;
pub mod employee;
pub mod error;
pub mod models;
pub mod organization;
pub mod question;
pub mod recommendation;

pub use error::{DatabaseError, Result};
pub use models::{
    AgentRecommendation, CareerPath, ContentRecommendation, Designation, Employee, JobDescription,
    NewContentRecommendation, NewRecommendation, Recommendation, UserQuestion,
};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    /// Set high enough for concurrent generation runs and agent tasks.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Run a trivial query to confirm the store is reachable.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
