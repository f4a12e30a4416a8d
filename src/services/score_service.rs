use chrono::NaiveDate;
use std::sync::Arc;

use crate::error::AppResult;
use crate::repository::ScoreRepository;
use crate::utils::ensure_positive;

pub struct ScoreService {
    score_repo: Arc<ScoreRepository>,
}

impl ScoreService {
    pub fn new(score_repo: Arc<ScoreRepository>) -> Self {
        Self { score_repo }
    }

    pub async fn dates_with_at_least_n_scores(&self, n: i64) -> AppResult<Vec<NaiveDate>> {
        let n = ensure_positive("min_scores", n)?;
        let dates = self.score_repo.dates_with_at_least_n_scores(n).await?;
        tracing::debug!("{} dates have at least {} scores", dates.len(), n);
        Ok(dates)
    }

    pub async fn users_with_top_score_on_date(&self, date: NaiveDate) -> AppResult<Vec<i64>> {
        let user_ids = self.score_repo.users_with_top_score_on_date(date).await?;
        tracing::debug!("{} users share the top score on {}", user_ids.len(), date);
        Ok(user_ids)
    }

    pub async fn dates_user_in_top_n(&self, user_id: i64, n: i64) -> AppResult<Vec<NaiveDate>> {
        let n = ensure_positive("n", n)?;
        let dates = self.score_repo.dates_user_in_top_n(user_id, n).await?;
        tracing::debug!("User {} placed in the top {} on {} dates", user_id, n, dates.len());
        Ok(dates)
    }
}
