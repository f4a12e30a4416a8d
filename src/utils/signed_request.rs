use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;
use std::str::FromStr;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Verified request payload: string keys mapped to arbitrary JSON values.
pub type Payload = Map<String, Value>;

/// Standard alphabet, padding optional. Tokens arrive in the URL-safe alphabet and are
/// translated back before decoding.
const TOKEN_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// How the producer encoded the HMAC digest before base64-encoding it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SignatureFormat {
    /// The 32 raw digest bytes.
    #[default]
    Raw,
    /// The 64-character lowercase hex digest (legacy producers).
    Hex,
}

impl FromStr for SignatureFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(SignatureFormat::Raw),
            "hex" => Ok(SignatureFormat::Hex),
            other => Err(format!("unknown signature format: {}", other)),
        }
    }
}

impl std::fmt::Display for SignatureFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignatureFormat::Raw => write!(f, "raw"),
            SignatureFormat::Hex => write!(f, "hex"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Malformation {
    #[error("signature or payload component is missing")]
    MissingComponent,
    #[error("payload is not valid base64")]
    PayloadEncoding,
    #[error("payload is not a JSON value")]
    InvalidPayload,
}

/// Why a signed request was refused. Callers outside this module should treat every
/// variant the same way; the reason only exists for logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RequestRejection {
    #[error("malformed token: {0}")]
    MalformedToken(Malformation),
    #[error("signature does not match payload")]
    SignatureMismatch,
}

/// Verify a `signature.payload` request string against `secret`, expecting a raw digest.
pub fn verify_request(request: &str, secret: &str) -> Result<Payload, RequestRejection> {
    verify_request_with(request, secret, SignatureFormat::Raw)
}

/// Verify a request string whose signature was encoded with `format`.
///
/// The signature is recomputed over [`canonical_json`] of the parsed payload, not over the
/// bytes the producer sent. A top-level JSON `null` payload is indistinguishable from a
/// parse failure and is rejected as malformed.
///
/// Both base64 alphabets are accepted: `-` and `+` decode to the same value, as do `_`
/// and `/`. Swapping one for its twin yields a different token string that still
/// verifies, so token strings are not unique per payload. Any other character change is
/// rejected.
pub fn verify_request_with(
    request: &str,
    secret: &str,
    format: SignatureFormat,
) -> Result<Payload, RequestRejection> {
    let normalized: String = request
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();

    let (signature_part, payload_part) = normalized
        .split_once('.')
        .filter(|(sig, payload)| !sig.is_empty() && !payload.is_empty())
        .ok_or(RequestRejection::MalformedToken(Malformation::MissingComponent))?;

    let payload_bytes = TOKEN_BASE64
        .decode(payload_part)
        .map_err(|_| RequestRejection::MalformedToken(Malformation::PayloadEncoding))?;

    let payload: Value = match serde_json::from_slice(&payload_bytes) {
        Ok(Value::Null) | Err(_) => {
            return Err(RequestRejection::MalformedToken(Malformation::InvalidPayload))
        }
        Ok(value) => value,
    };

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| RequestRejection::SignatureMismatch)?;
    mac.update(canonical_json(&payload).as_bytes());

    let provided = TOKEN_BASE64.decode(signature_part).unwrap_or_default();

    let matches = match format {
        SignatureFormat::Raw => mac.verify_slice(&provided).is_ok(),
        SignatureFormat::Hex => {
            let expected = hex::encode(mac.finalize().into_bytes());
            bool::from(expected.as_bytes().ct_eq(provided.as_slice()))
        }
    };
    if !matches {
        return Err(RequestRejection::SignatureMismatch);
    }

    Ok(into_mapping(payload))
}

/// Canonical encoding both sides of a signed request must agree on.
///
/// Compact serde_json output: no insignificant whitespace, object keys in the order they
/// were received, serde_json number formatting, `/` left unescaped and non-ASCII text
/// written as UTF-8. A producer has to sign exactly these bytes, otherwise genuine
/// requests fail verification.
pub fn canonical_json(value: &Value) -> String {
    value.to_string()
}

fn into_mapping(value: Value) -> Payload {
    match value {
        Value::Object(map) => map,
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(index, item)| (index.to_string(), item))
            .collect(),
        scalar => {
            let mut map = Payload::new();
            map.insert("0".to_string(), scalar);
            map
        }
    }
}
