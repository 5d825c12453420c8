//! Maps a completed HTTP response to a decoded payload or a classified error.
//!
//! Classification is a pure function of the status code and body bytes; the
//! retry loop above it only adds retry and deadline semantics and never
//! re-classifies.

use crate::error::ServiceError;
use crate::{Error, Result};
use http::StatusCode;
use serde_json::Value;

/// Classifies a completed HTTP response.
///
/// Decision table, in order:
///
/// 1. Sub-400 status with an empty (whitespace-only) body → [`Error::EmptyResponse`].
/// 2. Sub-400 status with valid JSON → the decoded value.
/// 3. Sub-400 status with anything else → [`Error::MalformedResponse`].
/// 4. 401 → [`Error::TokenNotValidated`], 403 → [`Error::AccessDenied`],
///    404 → [`Error::ResourceNotFound`], 429 → [`Error::RateLimited`].
///    These are recognized from the status line alone, since their bodies
///    may be absent or non-JSON.
/// 5. Any other status of 400 or above → the body decoded as a
///    [`ServiceError`], or [`Error::MalformedResponse`] if it does not parse.
///
/// `endpoint` is the requested path, recorded in the not-found variant.
pub fn classify(status: StatusCode, endpoint: &str, body: &str) -> Result<Value> {
    if status.as_u16() < 400 {
        if body.trim().is_empty() {
            return Err(Error::EmptyResponse);
        }
        return serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
            reason: e.to_string(),
        });
    }

    match status.as_u16() {
        401 => Err(Error::TokenNotValidated),
        403 => Err(Error::AccessDenied),
        404 => Err(Error::ResourceNotFound {
            endpoint: endpoint.to_string(),
        }),
        429 => Err(Error::RateLimited),
        _ => match serde_json::from_str::<ServiceError>(body) {
            Ok(service_error) => Err(Error::Api(service_error)),
            Err(e) => Err(Error::MalformedResponse {
                reason: e.to_string(),
            }),
        },
    }
}
