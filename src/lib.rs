//! # Lookout - an async client for the Lookout monitoring REST API
//!
//! Lookout wraps the service's JSON API in a small client built on `reqwest`.
//! The interesting part is the request engine: every call enforces a per-call
//! deadline, retries rate-limited attempts on a fixed interval, and maps the
//! service's heterogeneous failure modes onto a precise error taxonomy that
//! calling code can match on.
//!
//! ## Quick Start
//!
//! ```no_run
//! use lookout::{Client, resource};
//! use serde_json::json;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lookout::Error> {
//!     let client = Client::builder("sampleapp", "abc123")
//!         .timeout(Duration::from_secs(10))
//!         .retry_limit(3)
//!         .build()?;
//!
//!     // List an entire resource collection.
//!     let checks = client.list(resource::CHECK).await?;
//!     println!("checks: {}", checks.data);
//!
//!     // Create a new check.
//!     let created = client
//!         .add(
//!             resource::CHECK,
//!             &json!({ "target": "10.0.0.1", "type": "ping" }),
//!             [],
//!         )
//!         .await?;
//!     println!("created: {} (after {} attempts)", created.data, created.attempts);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Call semantics
//!
//! A call produces exactly one outcome: a decoded [`Response`] or one
//! [`Error`]. Attempts within a call are strictly sequential, and only a
//! rate-limited attempt (HTTP 429) is retried - up to the configured retry
//! limit, after which the call fails with [`Error::RateLimitExceeded`]. All
//! other failures are terminal the first time they occur. The per-call
//! deadline covers the whole loop, retry waits included; configuring a zero
//! timeout disables the deadline.
//!
//! Calls on the same client are independent: the client shares only its
//! transport handle and immutable configuration, so concurrent calls never
//! serialize on each other.
//!
//! ## Error Handling
//!
//! Errors stay inspectable rather than collapsing into strings:
//!
//! ```no_run
//! use lookout::{Client, Error, resource};
//!
//! # async fn example() -> Result<(), Error> {
//! # let client = Client::builder("sampleapp", "abc123").build()?;
//! match client.get(resource::GRAPH, "42").await {
//!     Ok(response) => println!("graph: {}", response.data),
//!     Err(Error::ResourceNotFound { endpoint }) => {
//!         eprintln!("no such endpoint: {endpoint}");
//!     }
//!     Err(Error::Api(service_error)) => {
//!         eprintln!(
//!             "service error {} ({}): {}",
//!             service_error.code, service_error.reference, service_error.explanation,
//!         );
//!     }
//!     Err(e) => eprintln!("call failed: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod classify;
mod client;
mod error;
mod request;
mod response;

pub use api::resource;
pub use client::{
    Client, ClientBuilder, DEFAULT_BASE_PATH, DEFAULT_BASE_URL, DEFAULT_RETRY_INTERVAL,
    DEFAULT_RETRY_LIMIT, DEFAULT_TIMEOUT,
};
pub use error::{Error, Result, ServiceError};
pub use request::Request;
pub use response::Response;
