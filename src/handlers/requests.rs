use actix_web::{web, HttpResponse};

use super::AppState;
use crate::error::AppResult;
use crate::models::VerifyRequestBody;
use crate::utils::{verify_request_with, ApiResponse};

/// POST /api/v1/requests/verify
pub async fn verify(
    state: web::Data<AppState>,
    body: web::Json<VerifyRequestBody>,
) -> AppResult<HttpResponse> {
    let payload = verify_request_with(
        body.request.trim(),
        &state.config.request_secret,
        state.config.signature_format,
    )?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(payload, "Request verified")))
}
