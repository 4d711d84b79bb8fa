//! Persistence layer for the laundry booking service.
//!
//! Provides pool setup, migrations, row models and one repository per table.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Connection settings used at process startup.
#[derive(Debug, Clone)]
pub struct ConnectConfig {
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Additional attempts after the first failed connect.
    pub retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for ConnectConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            retries: 5,
            initial_delay: Duration::from_secs(5),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Calculate the next backoff delay, clamped to [`ConnectConfig::max_delay`].
pub fn next_delay(current: Duration, config: &ConnectConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// Create a pool, retrying with exponential backoff while the database is
/// unreachable. Returns the last error once all retries are spent.
///
/// Only used at startup; individual queries are never retried.
pub async fn connect_with_retry(
    database_url: &str,
    config: &ConnectConfig,
) -> Result<DbPool, sqlx::Error> {
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        match create_pool(database_url, config.max_connections).await {
            Ok(pool) => {
                if attempt > 0 {
                    tracing::info!(attempt, "Connected to database after retrying");
                }
                return Ok(pool);
            }
            Err(err) if attempt < config.retries => {
                attempt += 1;
                tracing::warn!(
                    attempt,
                    retries = config.retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Could not connect to database, retrying",
                );
                tokio::time::sleep(delay).await;
                delay = next_delay(delay, config);
            }
            Err(err) => {
                tracing::error!(
                    attempts = attempt + 1,
                    error = %err,
                    "Giving up connecting to database",
                );
                return Err(err);
            }
        }
    }
}

/// Verify the database answers a trivial query.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
