use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Create result sets table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS result_sets (
            id UUID PRIMARY KEY,
            subject VARCHAR(255) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL,
            record_count INTEGER NOT NULL,
            records JSONB NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Listing is always newest-first
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_result_sets_created_at ON result_sets(created_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_result_sets_subject ON result_sets(subject)")
        .execute(pool)
        .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}
