//! Logical request description: method, path, and query parameters.

use http::Method;
use std::collections::HashMap;

/// A logical request against the Lookout API, independent of retry attempts.
///
/// The path is relative to the client's base path (so `/check/1234` becomes
/// `/v2/check/1234` with the default configuration). The request body, if
/// any, is passed separately to [`Client::send`](crate::Client::send).
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method (GET, POST, etc.).
    pub method: Method,

    /// The resource path, relative to the base path.
    pub path: String,

    /// Query parameters for this request.
    ///
    /// Keys are unique and ordering is not significant.
    pub params: HashMap<String, String>,
}

impl Request {
    /// Creates a new `Request` with the given method and resource path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: HashMap::new(),
        }
    }

    /// Adds a query parameter to the request.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Adds multiple query parameters to the request.
    pub fn with_params(mut self, params: impl IntoIterator<Item = (String, String)>) -> Self {
        self.params.extend(params);
        self
    }
}
