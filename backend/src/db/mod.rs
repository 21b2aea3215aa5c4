//! PostgreSQL pool, migrations and liveness check

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Pool options derived from configuration, without connecting
pub fn pool_options(database: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(database.max_connections)
        .min_connections(database.min_connections.min(database.max_connections))
        .acquire_timeout(Duration::from_secs(database.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(database.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(database.max_lifetime_secs))
        .test_before_acquire(true)
}

/// Connect to PostgreSQL using the configured pool settings
pub async fn connect(database: &DatabaseConfig) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&database.url)
        .context("Invalid database URL")?
        .application_name("dating-api");

    let pool = pool_options(database)
        .connect_with(connect_options)
        .await
        .context("Failed to connect to database")?;

    info!(
        max = database.max_connections,
        min = database.min_connections,
        "Database pool ready"
    );

    Ok(pool)
}

/// Apply pending schema migrations from `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    info!("Migrations applied");
    Ok(())
}

/// Round-trip a trivial query
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    if let Err(e) = sqlx::query("SELECT 1").execute(pool).await {
        warn!("Database health check failed: {}", e);
        return Err(e);
    }
    Ok(())
}
