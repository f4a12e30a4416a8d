use actix_web::{web, HttpMessage, HttpRequest, HttpResponse};

use super::AppState;
use crate::error::{AppError, AppResult};
use crate::models::{
    MinScoresQuery, ScoreDatesResponse, SignedPayload, TopNQuery, TopUsersQuery,
    TopUsersResponse,
};
use crate::utils::{validate_request, ApiResponse};

fn get_user_id(req: &HttpRequest) -> AppResult<i64> {
    let payload = req
        .extensions()
        .get::<SignedPayload>()
        .cloned()
        .ok_or_else(|| AppError::Unauthorized("Signed request required".to_string()))?;

    payload
        .user_id()
        .ok_or_else(|| AppError::BadRequest("Signed payload has no user_id".to_string()))
}

/// GET /api/v1/scores/dates?min_scores=N
pub async fn dates_with_min_scores(
    state: web::Data<AppState>,
    query: web::Query<MinScoresQuery>,
) -> AppResult<HttpResponse> {
    validate_request(&query.0)?;
    let dates = state
        .score_service
        .dates_with_at_least_n_scores(query.min_scores)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(ScoreDatesResponse { dates })))
}

/// GET /api/v1/scores/top-users?date=YYYY-MM-DD
pub async fn top_users(
    state: web::Data<AppState>,
    query: web::Query<TopUsersQuery>,
) -> AppResult<HttpResponse> {
    let user_ids = state
        .score_service
        .users_with_top_score_on_date(query.date)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(TopUsersResponse {
        date: query.date,
        user_ids,
    })))
}

/// GET /api/v1/scores/users/{user_id}/top-dates?n=N
pub async fn user_top_dates(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    query: web::Query<TopNQuery>,
) -> AppResult<HttpResponse> {
    validate_request(&query.0)?;
    let dates = state
        .score_service
        .dates_user_in_top_n(path.into_inner(), query.n)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::data(ScoreDatesResponse { dates })))
}

/// GET /api/v1/scores/me/top-dates?n=N
pub async fn my_top_dates(
    state: web::Data<AppState>,
    req: HttpRequest,
    query: web::Query<TopNQuery>,
) -> AppResult<HttpResponse> {
    let user_id = get_user_id(&req)?;
    validate_request(&query.0)?;
    let dates = state.score_service.dates_user_in_top_n(user_id, query.n).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        ScoreDatesResponse { dates },
        "Top placements retrieved",
    )))
}
