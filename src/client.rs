//! The Lookout API client: single-attempt execution plus the retry loop and
//! per-call deadline wrapped around it.
//!
//! Use [`ClientBuilder`] to configure and create clients.

use crate::classify::classify;
use crate::{Error, Request, Response, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.lookout.io";

/// API version prefix applied to every request path.
pub const DEFAULT_BASE_PATH: &str = "/v2";

/// Default per-call deadline, covering all attempts and retry waits.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default number of retries after a rate-limited attempt.
pub const DEFAULT_RETRY_LIMIT: usize = 5;

/// Default fixed delay between rate-limited attempts.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(1);

/// An asynchronous client for the Lookout monitoring REST API.
///
/// The client is cheap to clone and safe to share: it owns a reused
/// `reqwest::Client` and immutable configuration behind an `Arc`. Concurrent
/// calls on one client are independent; the service rate-limits per token, so
/// local concurrency buys nothing, but each call remains individually correct.
///
/// Each call makes sequential attempts: a rate-limited attempt (HTTP 429) is
/// retried after a fixed interval up to the configured retry limit, every
/// other failure is terminal, and the whole loop runs under one per-call
/// deadline.
///
/// # Examples
///
/// ```no_run
/// use lookout::{Client, Request};
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), lookout::Error> {
/// let client = Client::builder("sampleapp", "abc123")
///     .timeout(Duration::from_secs(10))
///     .retry_limit(3)
///     .build()?;
///
/// // Convenience methods cover the usual CRUD shapes...
/// let checks = client.list(lookout::resource::CHECK).await?;
/// println!("checks: {}", checks.data);
///
/// // ...and `send` takes an explicit logical request.
/// let request = Request::new(http::Method::GET, "/check").with_param("search", "cpu");
/// let found = client.send::<()>(request, None).await?;
/// println!("found: {}", found.data);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: Url,
    base_path: String,
    app_name: String,
    auth_token: String,
    retry_limit: usize,
    retry_interval: Duration,
    timeout: Option<Duration>,
}

impl Client {
    /// Creates a new [`ClientBuilder`] for the given application name and
    /// API token. Both are sent with every request as identifying headers.
    pub fn builder(app_name: impl Into<String>, auth_token: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(app_name, auth_token)
    }

    /// Sends a logical request and returns its single outcome.
    ///
    /// The body, if present, is serialized to JSON before any network I/O;
    /// a value that cannot be serialized yields [`Error::RequestData`]
    /// without touching the wire. Attempts are strictly sequential, only
    /// rate-limited attempts are retried, and if the per-call deadline
    /// elapses first the in-flight attempt is aborted and the call returns
    /// [`Error::Timeout`].
    pub async fn send<B>(&self, request: Request, body: Option<&B>) -> Result<Response>
    where
        B: Serialize,
    {
        let body = match body {
            Some(body) => Some(serde_json::to_value(body).map_err(|e| Error::RequestData {
                reason: e.to_string(),
            })?),
            None => None,
        };

        // The deadline covers the whole retry loop, sleeps included. Timing
        // out drops the loop future, which aborts any in-flight attempt and
        // releases its connection before this call returns.
        match self.inner.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.run(&request, body.as_ref())).await
            {
                Ok(outcome) => outcome,
                Err(_) => {
                    tracing::warn!(
                        method = %request.method,
                        path = %request.path,
                        limit_ms = limit.as_millis(),
                        "Call deadline elapsed"
                    );
                    Err(Error::Timeout)
                }
            },
            None => self.run(&request, body.as_ref()).await,
        }
    }

    /// Runs the retry loop to a terminal outcome.
    async fn run(&self, request: &Request, body: Option<&Value>) -> Result<Response> {
        let start = Instant::now();
        let mut attempt = 0;

        loop {
            attempt += 1;

            match self.try_request(request, body, attempt).await {
                Ok(data) => return Ok(Response::new(data, attempt, start.elapsed())),
                Err(e) if e.is_rate_limited() => {
                    if attempt > self.inner.retry_limit {
                        tracing::warn!(
                            attempts = attempt,
                            method = %request.method,
                            path = %request.path,
                            "Rate limited on every attempt, giving up"
                        );
                        return Err(Error::RateLimitExceeded { attempts: attempt });
                    }

                    tracing::info!(
                        attempt = attempt,
                        delay_ms = self.inner.retry_interval.as_millis(),
                        path = %request.path,
                        "Rate limited, retrying after delay"
                    );
                    tokio::time::sleep(self.inner.retry_interval).await;
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        attempt = attempt,
                        method = %request.method,
                        path = %request.path,
                        "Request failed"
                    );
                    return Err(e);
                }
            }
        }
    }

    /// Performs exactly one HTTP round trip and classifies the result.
    async fn try_request(
        &self,
        request: &Request,
        body: Option<&Value>,
        attempt: usize,
    ) -> Result<Value> {
        let mut url = self.inner.base_url.clone();
        url.set_path(&format!("{}{}", self.inner.base_path, request.path));
        if !request.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.params {
                pairs.append_pair(key, value);
            }
        }

        tracing::debug!(
            method = %request.method,
            url = %url,
            attempt = attempt,
            "Executing HTTP request"
        );

        let mut builder = self
            .inner
            .http_client
            .request(request.method.clone(), url)
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .header("X-Lookout-App-Name", self.inner.app_name.as_str())
            .header("X-Lookout-Auth-Token", self.inner.auth_token.as_str());

        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        // Always drain the body, error statuses included.
        let text = response.text().await?;

        classify(status, &request.path, &text)
    }
}

/// Builder for configuring and creating a [`Client`].
///
/// # Examples
///
/// ```no_run
/// use lookout::Client;
/// use std::time::Duration;
///
/// # fn example() -> Result<(), lookout::Error> {
/// let client = Client::builder("sampleapp", "abc123")
///     .base_url("https://api.lookout.example.com")?
///     .timeout(Duration::from_secs(10))
///     .retry_limit(3)
///     .retry_interval(Duration::from_millis(500))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    app_name: String,
    auth_token: String,
    base_url: Option<Url>,
    base_path: String,
    retry_limit: usize,
    retry_interval: Duration,
    timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Creates a builder with default settings.
    pub fn new(app_name: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            auth_token: auth_token.into(),
            base_url: None,
            base_path: DEFAULT_BASE_PATH.to_string(),
            retry_limit: DEFAULT_RETRY_LIMIT,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            timeout: Some(DEFAULT_TIMEOUT),
        }
    }

    /// Sets the API host. Defaults to [`DEFAULT_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn base_url(mut self, url: impl AsRef<str>) -> Result<Self> {
        self.base_url = Some(Url::parse(url.as_ref())?);
        Ok(self)
    }

    /// Sets the path prefix applied to every request. Defaults to
    /// [`DEFAULT_BASE_PATH`].
    pub fn base_path(mut self, path: impl Into<String>) -> Self {
        self.base_path = path.into();
        self
    }

    /// Sets the number of retries allowed after rate-limited attempts.
    ///
    /// A limit of `n` allows `n + 1` attempts in total. Zero disables
    /// retrying.
    pub fn retry_limit(mut self, limit: usize) -> Self {
        self.retry_limit = limit;
        self
    }

    /// Sets the fixed delay between rate-limited attempts.
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Sets the per-call deadline, covering all attempts and retry waits.
    ///
    /// A zero duration disables the deadline entirely: the call then only
    /// terminates on success, a terminal error, or exhausted retries.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = if timeout.is_zero() {
            None
        } else {
            Some(timeout)
        };
        self
    }

    /// Builds the configured [`Client`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<Client> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Client {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                base_path: self.base_path,
                app_name: self.app_name,
                auth_token: self.auth_token,
                retry_limit: self.retry_limit,
                retry_interval: self.retry_interval,
                timeout: self.timeout,
            }),
        })
    }
}
