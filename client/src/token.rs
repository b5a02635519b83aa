//! Best-effort structural decoding of bearer token payloads.
//!
//! Nothing here verifies signatures or expiry; the backend answers 401 for
//! tokens it no longer accepts.

use std::fmt::Display;

use serde::Serialize;
use serde_json::{Map, Value};
use shared::EntityId;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identity {
    pub id: EntityId,
    pub name: String,
    /// Every other claim carried by the token, such as `iat` or `exp`.
    #[serde(flatten)]
    pub claims: Map<String, Value>,
}

impl Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Identity[id: {}, name: {}]", self.id, self.name)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("payload is not valid base64url: {0}")]
    Base64(String),
    #[error("payload is not valid JSON: {0}")]
    Json(String),
    #[error("payload is not a JSON object")]
    NotAnObject,
    #[error("payload lacks a usable `{0}` claim")]
    MissingClaim(&'static str),
}

/// Decodes an optional token, logging and swallowing any failure.
pub fn decode(token: Option<&str>) -> Option<Identity> {
    let token = token?;
    match try_decode(token) {
        Ok(identity) => Some(identity),
        Err(error) => {
            warn!(error = %error, "Fail to decode bearer token");
            None
        }
    }
}

/// Issuers differ on number encoding, `7` and `7.0` name the same user.
fn integral_id(value: &Value) -> Option<EntityId> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|id| id.fract() == 0.0 && id.abs() < i64::MAX as f64)
            .map(|id| id as EntityId)
    })
}

pub fn try_decode(token: &str) -> Result<Identity, DecodeError> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or(DecodeError::MissingPayload)?;
    let bytes = base64_url::decode(payload.trim_end_matches('='))
        .map_err(|error| DecodeError::Base64(error.to_string()))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|error| DecodeError::Json(error.to_string()))?;
    let Value::Object(mut claims) = value else {
        return Err(DecodeError::NotAnObject);
    };

    let id = claims
        .get("id")
        .and_then(integral_id)
        .filter(|id| *id != 0)
        .ok_or(DecodeError::MissingClaim("id"))?;
    let name = claims
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .ok_or(DecodeError::MissingClaim("name"))?;
    claims.remove("id");
    claims.remove("name");

    Ok(Identity { id, name, claims })
}
