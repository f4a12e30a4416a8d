use sqlx::postgres::PgPoolOptions;
use sqlx::Executor;
use std::time::Duration;

use crate::database::run_migrations;

#[tokio::test]
async fn test_migrations_fail_without_a_database() {
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgres://localhost:1/unused")
        .expect("lazy pool");

    let result = run_migrations(&pool).await;

    let err = result.expect_err("unreachable database must fail the migrations");
    assert!(err.to_string().contains("migration 1 failed"));
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_migrations_fail_when_table_cannot_be_created() {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // No schema on the search path means CREATE TABLE has nowhere to go.
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET search_path TO scores_missing_schema").await?;
                Ok(())
            })
        })
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    let err = run_migrations(&pool)
        .await
        .expect_err("CREATE TABLE without a schema must fail the migrations");
    assert!(err.to_string().contains("migration 1 failed"));
}
