use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ScoreRow {
    pub date: NaiveDate,
    pub user_id: i64,
    pub score: i64,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MinScoresQuery {
    #[validate(range(min = 1, message = "min_scores must be at least 1"))]
    pub min_scores: i64,
}

#[derive(Debug, Deserialize)]
pub struct TopUsersQuery {
    pub date: NaiveDate, // YYYY-MM-DD
}

#[derive(Debug, Deserialize, Validate)]
pub struct TopNQuery {
    #[validate(range(min = 1, max = 1000, message = "n must be between 1 and 1000"))]
    pub n: i64,
}

#[derive(Debug, Serialize)]
pub struct ScoreDatesResponse {
    pub dates: Vec<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct TopUsersResponse {
    pub date: NaiveDate,
    pub user_ids: Vec<i64>,
}
