//! Database connection and pool management
//!
//! Pool setup, embedded migrations and the catalogue health probe.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::Config;

/// Database connection error
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Failed to connect to database: {0}")]
    ConnectionError(String),

    #[error("Failed to run migrations: {0}")]
    MigrationError(String),

    #[error("Database health check failed: {0}")]
    HealthCheckError(String),
}

/// Create a database connection pool
pub async fn create_pool(config: &Config) -> Result<PgPool, DbError> {
    tracing::info!("Connecting to database at {}", config.database_url_masked());

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(&config.database_url)
        .await
        .map_err(|e| DbError::ConnectionError(e.to_string()))?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running database migrations...");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DbError::MigrationError(e.to_string()))?;

    tracing::info!("Database migrations completed successfully");

    Ok(())
}

/// What `/health` reports about the catalogue database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbStatus {
    /// Latest applied migration, `None` before the first run
    pub schema_version: Option<i64>,
    pub approved_listings: i64,
}

/// Check connectivity, the applied schema version and the live catalogue size
pub async fn check_health(pool: &PgPool) -> Result<DbStatus, DbError> {
    let schema_version: Option<i64> = sqlx::query_scalar(
        "SELECT MAX(version) FROM _sqlx_migrations WHERE success",
    )
    .fetch_one(pool)
    .await
    .map_err(|e| DbError::HealthCheckError(e.to_string()))?;

    let approved_listings: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM listings WHERE status = 'approved'")
            .fetch_one(pool)
            .await
            .map_err(|e| DbError::HealthCheckError(e.to_string()))?;

    Ok(DbStatus {
        schema_version,
        approved_listings,
    })
}
