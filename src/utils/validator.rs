use validator::Validate;

use crate::error::{AppError, AppResult};

/// Validate a request struct using the validator crate
pub fn validate_request<T: Validate>(request: &T) -> AppResult<()> {
    request.validate().map_err(|e| {
        let errors: Vec<String> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |err| {
                    format!(
                        "{}: {}",
                        field,
                        err.message.clone().unwrap_or_else(|| "Invalid value".into())
                    )
                })
            })
            .collect();

        AppError::ValidationError(errors.join(", "))
    })
}

/// Check that a count or limit argument can be used in a score query
pub fn ensure_positive(name: &str, value: i64) -> AppResult<i64> {
    if value < 1 {
        return Err(AppError::ValidationError(format!(
            "{} must be at least 1",
            name
        )));
    }
    Ok(value)
}
