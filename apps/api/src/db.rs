use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

const MAX_CONNECTIONS: u32 = 10;
const ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Connects to the database holding `sample_jobs`, `sample_courses` and
/// `recommendations`.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    info!("PostgreSQL connection pool established");
    log_catalog_size(&pool).await;
    Ok(pool)
}

/// An empty or missing catalog is not fatal: every request then goes to the AI pipeline.
async fn log_catalog_size(pool: &PgPool) {
    for table in ["sample_jobs", "sample_courses"] {
        let count: Result<i64, sqlx::Error> =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
                .fetch_one(pool)
                .await;
        match count {
            Ok(n) => info!("Catalog table {table}: {n} rows"),
            Err(e) => warn!("Catalog table {table} is unavailable: {e}"),
        }
    }
}
