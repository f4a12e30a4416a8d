use sqlx::PgPool;
use tracing::info;
use anyhow::{Context, Result};

/// Run database migrations. Every statement is idempotent, so any failure is fatal.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    let migrations = [
        // One row per recorded score
        r#"CREATE TABLE IF NOT EXISTS scores (
            date DATE NOT NULL,
            user_id BIGINT NOT NULL,
            score BIGINT NOT NULL
        );"#,

        r#"CREATE INDEX IF NOT EXISTS idx_scores_date_score ON scores (date, score DESC);"#,
        r#"CREATE INDEX IF NOT EXISTS idx_scores_user_id ON scores (user_id);"#,
    ];

    for (i, migration) in migrations.iter().enumerate() {
        sqlx::query(migration)
            .execute(pool)
            .await
            .with_context(|| format!("migration {} failed", i + 1))?;
    }

    info!("All migrations completed successfully");
    Ok(())
}
