use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS schedule_snapshots (
    id            UUID PRIMARY KEY,
    user_id       UUID NOT NULL,
    label         TEXT NOT NULL,
    version       INTEGER NOT NULL,
    offerings     JSONB NOT NULL,
    total_credits INTEGER NOT NULL,
    html_key      TEXT,
    created_at    TIMESTAMPTZ NOT NULL DEFAULT now(),
    UNIQUE (user_id, label, version)
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the snapshot table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(SCHEMA)
        .execute(pool)
        .await
        .context("failed to create schedule_snapshots table")?;
    info!("Database schema ready");
    Ok(())
}
