use serde::Deserialize;
use serde_json::Value;

use crate::utils::Payload;

/// Payload of a verified `X-Signed-Request` header, stored in request extensions.
#[derive(Debug, Clone, PartialEq)]
pub struct SignedPayload(pub Payload);

impl SignedPayload {
    /// `user_id` claim, accepted as a JSON integer or a numeric string.
    pub fn user_id(&self) -> Option<i64> {
        match self.0.get("user_id")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Body of `POST /api/v1/requests/verify`. Any string is accepted here; the verifier
/// decides whether it is a well-formed token.
#[derive(Debug, Deserialize)]
pub struct VerifyRequestBody {
    pub request: String,
}
