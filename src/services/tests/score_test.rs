use chrono::{NaiveDate, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use std::sync::Arc;

use crate::error::AppError;
use crate::repository::ScoreRepository;
use crate::services::ScoreService;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn d1() -> NaiveDate {
    date(2017, 1, 2)
}

fn d2() -> NaiveDate {
    date(2017, 1, 1)
}

/// Connects to `DATABASE_URL` inside a throwaway schema so tests never see each other's rows.
async fn test_pool(tag: &str) -> (PgPool, String) {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let schema = format!("scores_test_{}_{}", tag, Utc::now().timestamp_micros());
    let search_path = schema.clone();
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .after_connect(move |conn, _meta| {
            let statement = format!(
                "CREATE SCHEMA IF NOT EXISTS {0}; SET search_path TO {0};",
                search_path
            );
            Box::pin(async move {
                conn.execute(statement.as_str()).await?;
                Ok(())
            })
        })
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    crate::database::run_migrations(&pool)
        .await
        .expect("Failed to run migrations in test setup");

    (pool, schema)
}

async fn drop_schema(pool: &PgPool, schema: &str) {
    pool.execute(format!("DROP SCHEMA IF EXISTS {} CASCADE", schema).as_str())
        .await
        .ok();
}

/// Rows `(d1,1,10),(d1,2,10),(d1,3,5),(d2,1,7)` with d1 the later date.
async fn setup_fixture(pool: &PgPool) -> ScoreService {
    let repo = Arc::new(ScoreRepository::new(pool.clone()));
    for (day, user_id, score) in [(d1(), 1, 10), (d1(), 2, 10), (d1(), 3, 5), (d2(), 1, 7)] {
        repo.record(day, user_id, score)
            .await
            .expect("Failed to insert fixture row");
    }
    ScoreService::new(repo)
}

fn offline_service() -> ScoreService {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/unused")
        .expect("lazy pool");
    ScoreService::new(Arc::new(ScoreRepository::new(pool)))
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_record_returns_inserted_row() {
    let (pool, schema) = test_pool("record").await;
    let repo = ScoreRepository::new(pool.clone());

    let row = repo.record(d1(), 9, 99).await.expect("insert");

    assert_eq!(row.date, d1());
    assert_eq!(row.user_id, 9);
    assert_eq!(row.score, 99);

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_users_with_top_score_on_date() {
    let (pool, schema) = test_pool("top_users").await;
    let service = setup_fixture(&pool).await;

    let users = service.users_with_top_score_on_date(d1()).await.expect("query");
    assert_eq!(users, vec![1, 2]);

    let users = service.users_with_top_score_on_date(d2()).await.expect("query");
    assert_eq!(users, vec![1]);

    let users = service
        .users_with_top_score_on_date(date(2030, 1, 1))
        .await
        .expect("query");
    assert!(users.is_empty());

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_dates_with_at_least_n_scores() {
    let (pool, schema) = test_pool("min_scores").await;
    let service = setup_fixture(&pool).await;

    assert_eq!(
        service.dates_with_at_least_n_scores(2).await.expect("query"),
        vec![d1()]
    );
    assert_eq!(
        service.dates_with_at_least_n_scores(1).await.expect("query"),
        vec![d1(), d2()]
    );
    assert!(service
        .dates_with_at_least_n_scores(4)
        .await
        .expect("query")
        .is_empty());

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_dates_user_in_top_n() {
    let (pool, schema) = test_pool("top_n").await;
    let service = setup_fixture(&pool).await;

    assert_eq!(
        service.dates_user_in_top_n(1, 1).await.expect("query"),
        vec![d1(), d2()]
    );
    assert_eq!(
        service.dates_user_in_top_n(2, 1).await.expect("query"),
        vec![d1()]
    );
    assert!(service
        .dates_user_in_top_n(42, 3)
        .await
        .expect("query")
        .is_empty());

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn test_dates_user_in_top_n_counts_score_rows() {
    let (pool, schema) = test_pool("top_n_ties").await;
    let service = setup_fixture(&pool).await;

    // Top two rows on d1 are both 10, so the 5 only makes the cut at n = 3.
    assert!(service
        .dates_user_in_top_n(3, 2)
        .await
        .expect("query")
        .is_empty());
    assert_eq!(
        service.dates_user_in_top_n(3, 3).await.expect("query"),
        vec![d1()]
    );

    drop_schema(&pool, &schema).await;
}

#[tokio::test]
async fn test_non_positive_arguments_are_rejected_before_querying() {
    let service = offline_service();

    let result = service.dates_with_at_least_n_scores(0).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));

    let result = service.dates_user_in_top_n(1, -3).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}
