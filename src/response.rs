//! Successful-response wrapper carrying the decoded payload and call metadata.

use serde_json::Value;
use std::time::Duration;

/// A successful API response.
///
/// Wraps the decoded JSON payload together with metadata about how the call
/// went: how many attempts it took (more than one means rate-limit retries
/// happened) and the total latency including retry waits.
///
/// # Examples
///
/// ```no_run
/// use lookout::Client;
///
/// # async fn example() -> Result<(), lookout::Error> {
/// let client = Client::builder("sampleapp", "abc123").build()?;
///
/// let response = client.get(lookout::resource::CHECK, "1234").await?;
/// println!("check: {}", response.data);
/// if response.was_retried() {
///     println!("took {} attempts over {:?}", response.attempts, response.latency);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    /// The decoded JSON payload.
    pub data: Value,

    /// The number of attempts made, including the first.
    pub attempts: usize,

    /// Total call latency, including inter-attempt delays.
    pub latency: Duration,
}

impl Response {
    pub(crate) fn new(data: Value, attempts: usize, latency: Duration) -> Self {
        Self {
            data,
            attempts,
            latency,
        }
    }

    /// Returns `true` if the call needed rate-limit retries.
    pub fn was_retried(&self) -> bool {
        self.attempts > 1
    }
}

impl AsRef<Value> for Response {
    fn as_ref(&self) -> &Value {
        &self.data
    }
}
