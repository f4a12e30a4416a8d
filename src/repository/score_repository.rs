use chrono::NaiveDate;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::models::ScoreRow;

#[derive(Clone)]
pub struct ScoreRepository {
    pool: PgPool,
}

impl ScoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn record(&self, date: NaiveDate, user_id: i64, score: i64) -> AppResult<ScoreRow> {
        let row = sqlx::query_as::<_, ScoreRow>(
            r#"
            INSERT INTO scores (date, user_id, score)
            VALUES ($1, $2, $3)
            RETURNING date, user_id, score
            "#,
        )
        .bind(date)
        .bind(user_id)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Dates with at least `n` recorded scores, newest first
    pub async fn dates_with_at_least_n_scores(&self, n: i64) -> AppResult<Vec<NaiveDate>> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT date
            FROM scores
            GROUP BY date
            HAVING COUNT(*) >= $1
            ORDER BY date DESC
            "#,
        )
        .bind(n)
        .fetch_all(&self.pool)
        .await?;

        Ok(dates)
    }

    /// Users holding the top score on `date`, by ascending user id
    pub async fn users_with_top_score_on_date(&self, date: NaiveDate) -> AppResult<Vec<i64>> {
        let user_ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT user_id
            FROM scores
            WHERE date = $1 AND score = (
                SELECT MAX(score)
                FROM scores
                WHERE date = $1
            )
            ORDER BY user_id ASC
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(user_ids)
    }

    /// Dates on which the user's score was among that date's top `n` score rows, newest
    /// first. Rows tied with a score inside the cut count as well.
    pub async fn dates_user_in_top_n(&self, user_id: i64, n: i64) -> AppResult<Vec<NaiveDate>> {
        let dates = sqlx::query_scalar::<_, NaiveDate>(
            r#"
            SELECT sc1.date
            FROM scores AS sc1
            WHERE sc1.user_id = $1 AND sc1.score IN (
                SELECT sc2.score
                FROM scores AS sc2
                WHERE sc2.date = sc1.date
                ORDER BY sc2.score DESC
                LIMIT $2
            )
            ORDER BY sc1.date DESC
            "#,
        )
        .bind(user_id)
        .bind(n)
        .fetch_all(&self.pool)
        .await?;

        Ok(dates)
    }
}
