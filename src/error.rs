//! Error types for Lookout API calls.
//!
//! Every failed call surfaces exactly one [`Error`] value, and the variant is
//! precise enough to match on: authentication problems, missing resources,
//! exhausted rate-limit retries, and malformed payloads are all distinct.
//! Structured errors returned by the service itself are preserved as
//! [`ServiceError`] rather than flattened to a string.

use serde::{Deserialize, Serialize};

/// The main error type for Lookout API calls.
///
/// # Examples
///
/// ```no_run
/// use lookout::{Client, Error};
///
/// # async fn example() -> Result<(), Error> {
/// let client = Client::builder("sampleapp", "abc123").build()?;
///
/// match client.list(lookout::resource::CHECK).await {
///     Ok(response) => println!("checks: {}", response.data),
///     Err(Error::TokenNotValidated) => eprintln!("token was rejected"),
///     Err(Error::RateLimitExceeded { attempts }) => {
///         eprintln!("gave up after {attempts} rate-limited attempts")
///     }
///     Err(Error::Api(service_error)) => {
///         eprintln!("service error {}: {}", service_error.code, service_error.explanation)
///     }
///     Err(e) => eprintln!("other error: {e}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request body could not be serialized to JSON.
    ///
    /// Detected before any network I/O is attempted, so a request with a bad
    /// body never reaches the wire.
    #[error("cannot encode request data: {reason}")]
    RequestData {
        /// The underlying serde error message.
        reason: String,
    },

    /// A transport-level error occurred (DNS lookup, connect, or read failure).
    ///
    /// Wraps the underlying `reqwest::Error`. These are never retried.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// An invalid base URL was provided.
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The service answered with a success status but an empty body.
    #[error("empty response from Lookout")]
    EmptyResponse,

    /// The response body was not valid JSON.
    #[error("malformed JSON response from Lookout: {reason}")]
    MalformedResponse {
        /// The parse error message.
        reason: String,
    },

    /// The service rejected the authentication token (HTTP 401).
    #[error("invalid authentication token")]
    TokenNotValidated,

    /// The token is valid but not authorized for this resource (HTTP 403).
    #[error("access denied")]
    AccessDenied,

    /// The requested endpoint does not exist (HTTP 404).
    #[error("Lookout endpoint {endpoint:?} not found")]
    ResourceNotFound {
        /// The path of the request that was rejected.
        endpoint: String,
    },

    /// A single attempt was rate limited (HTTP 429).
    ///
    /// This is a transient signal consumed by the retry loop in
    /// [`Client::send`](crate::Client::send); callers never observe it.
    /// Exhausted retries surface as [`Error::RateLimitExceeded`] instead.
    #[error("request was rate limited")]
    RateLimited,

    /// Every attempt was rate limited and the retry budget is spent.
    #[error("request exceeded rate limit and exhausted retries ({attempts} attempts)")]
    RateLimitExceeded {
        /// Total attempts made, including the initial one.
        attempts: usize,
    },

    /// The per-call deadline elapsed before a terminal outcome was reached.
    #[error("request timed out")]
    Timeout,

    /// The service returned a structured error payload.
    ///
    /// The full payload is preserved; its `explanation` field is the
    /// human-readable message.
    #[error("{0}")]
    Api(ServiceError),

    /// Invalid client configuration.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Returns `true` for the transient rate-limit signal that the retry
    /// loop is allowed to retry. Everything else is terminal on first
    /// occurrence.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Error::RateLimited)
    }
}

/// A structured error payload returned by the Lookout service.
///
/// Any status code of 400 or above that is not one of the structurally
/// significant codes (401, 403, 404, 429) is expected to carry this shape.
/// Fields the service omits decode as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    /// Machine-readable error code.
    #[serde(default)]
    pub code: String,
    /// Human-readable explanation; used as the display message.
    #[serde(default)]
    pub explanation: String,
    /// Short error message.
    #[serde(default)]
    pub message: String,
    /// Support reference for this failure.
    #[serde(default)]
    pub reference: String,
    /// Error tag.
    #[serde(default)]
    pub tag: String,
    /// The server that produced the error.
    #[serde(default)]
    pub server: String,
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.explanation)
    }
}

/// A specialized `Result` type for Lookout API calls.
pub type Result<T> = std::result::Result<T, Error>;
