pub mod issues;

use civic_common::error::{CivicError, CivicResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Create a Postgres connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> CivicResult<PgPool> {
    tracing::info!(max_connections, "connecting to database");
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| CivicError::Database(e.to_string()))
}
