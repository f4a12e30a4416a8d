use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

use super::{canonical_json, SignatureFormat};

pub fn digest(body: &str, secret: &str) -> Vec<u8> {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC key");
    mac.update(body.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Builds a token the way a trusted producer does, with padded url-safe base64.
pub fn sign_request(payload: &Value, secret: &str, format: SignatureFormat) -> String {
    let body = canonical_json(payload);
    let signature = match format {
        SignatureFormat::Raw => digest(&body, secret),
        SignatureFormat::Hex => hex::encode(digest(&body, secret)).into_bytes(),
    };
    format!("{}.{}", URL_SAFE.encode(signature), URL_SAFE.encode(body.as_bytes()))
}
