//! Database Layer
//!
//! `PostgreSQL` connection pool, embedded migrations and user queries.

mod models;
mod queries;

use std::time::Duration;

use anyhow::Result;
pub use models::*;
pub use queries::*;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Log and return a database error with context.
///
/// Used as the argument to `map_err` so every failed query is logged with the
/// query name and its identifying fields before being propagated.
macro_rules! db_error {
    ($query:expr, $($field:tt)*) => {
        |e| {
            tracing::error!(query = $query, $($field)*, error = %e, "Database query failed");
            e
        }
    };
    ($query:expr) => {
        |e| {
            tracing::error!(query = $query, error = %e, "Database query failed");
            e
        }
    };
}

pub(crate) use db_error;

/// Create `PostgreSQL` connection pool.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        // Fail fast instead of hanging when the hosted database is unreachable
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .test_before_acquire(true)
        .connect(database_url)
        .await?;

    info!("Connected to PostgreSQL");
    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}
