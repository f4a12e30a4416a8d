pub mod requests;
pub mod scores;

use actix_web::HttpResponse;
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::ScoreService;
use crate::utils::ApiResponse;

/// Application state shared across all handlers
pub struct AppState {
    pub config: Arc<Config>,
    pub db_pool: PgPool,

    // Services
    pub score_service: Arc<ScoreService>,
}

/// Health check endpoint
pub async fn health_check(state: actix_web::web::Data<AppState>) -> HttpResponse {
    let database = match sqlx::query("SELECT 1").execute(&state.db_pool).await {
        Ok(_) => "up",
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            "down"
        }
    };

    HttpResponse::Ok().json(ApiResponse::success(
        serde_json::json!({
            "status": "healthy",
            "service": "Scoreboard Backend (Rust/Actix)",
            "version": env!("CARGO_PKG_VERSION"),
            "database": database,
            "signature_format": state.config.signature_format.to_string()
        }),
        "Service is healthy",
    ))
}

/// Fallback for unknown routes
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("Route not found".to_string()))
}
