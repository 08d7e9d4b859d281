//! HTTP client with retry and rate limiting
//!
//! Every request goes through the same pipeline:
//! - pace against the token bucket
//! - apply the Zoho OAuth header
//! - inspect the `X-Rate-Limit-*` headers
//! - classify the status and body, retrying with exponential backoff

use super::rate_limit::{RateLimiter, RateLimiterConfig};
use crate::auth::Authenticator;
use crate::dates::duration_until_next_day;
use crate::error::{Error, Result};
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Total request limit header
pub const RATE_LIMIT_HEADER: &str = "X-Rate-Limit-Limit";
/// Requests left for the day
pub const RATE_LIMIT_REMAINING_HEADER: &str = "X-Rate-Limit-Remaining";

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Attempts per request, including the first
    pub max_tries: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Growth factor for exponential backoff
    pub backoff_base: u32,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
    /// Rate limiter configuration
    pub rate_limit: Option<RateLimiterConfig>,
    /// Warn once when fewer requests than this have been used
    pub usage_warning_threshold: i64,
    /// Sleep until the next day when the daily quota is exhausted
    pub wait_for_daily_quota: bool,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            max_tries: 10,
            initial_backoff: Duration::from_secs(5),
            backoff_base: 4,
            max_backoff: Duration::from_secs(180),
            rate_limit: Some(RateLimiterConfig::default()),
            usage_warning_threshold: 500,
            wait_for_daily_quota: true,
            default_headers: HashMap::new(),
            user_agent: format!("tap-zohobooks/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the number of attempts per request
    pub fn max_tries(mut self, tries: u32) -> Self {
        self.config.max_tries = tries;
        self
    }

    /// Set the first retry delay and the cap
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Set the exponential growth factor
    pub fn backoff_base(mut self, base: u32) -> Self {
        self.config.backoff_base = base;
        self
    }

    /// Set rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.config.rate_limit = Some(config);
        self
    }

    /// Disable rate limiting
    pub fn no_rate_limit(mut self) -> Self {
        self.config.rate_limit = None;
        self
    }

    /// Return instead of sleeping when the daily quota runs out
    pub fn no_daily_quota_wait(mut self) -> Self {
        self.config.wait_for_daily_quota = false;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters, sent in order
    pub query: Vec<(String, String)>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
    /// Pause after every response
    pub delay_after: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add several query parameters
    #[must_use]
    pub fn queries<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(params.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sleep after each response
    #[must_use]
    pub fn delay_after(mut self, delay: Option<Duration>) -> Self {
        self.delay_after = delay;
        self
    }
}

/// A successful response
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status
    pub status: u16,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed body; `None` when the API sent nothing
    pub body: Option<Value>,
}

impl ApiResponse {
    /// Header value as a string
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// HTTP client with retry and rate limiting
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
    authenticator: Option<Arc<Authenticator>>,
    rate_limiter: Option<RateLimiter>,
    usage_alerted: AtomicBool,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        let rate_limiter = config.rate_limit.as_ref().map(RateLimiter::new);

        Ok(Self {
            client,
            config,
            authenticator: None,
            rate_limiter,
            usage_alerted: AtomicBool::new(false),
        })
    }

    /// Create a client with authentication
    pub fn with_auth(config: HttpClientConfig, authenticator: Authenticator) -> Result<Self> {
        let mut client = Self::with_config(config)?;
        client.set_authenticator(authenticator);
        Ok(client)
    }

    /// Set the authenticator
    pub fn set_authenticator(&mut self, authenticator: Authenticator) {
        self.authenticator = Some(Arc::new(authenticator));
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Whether the low-quota warning has been logged
    pub fn usage_alerted(&self) -> bool {
        self.usage_alerted.load(Ordering::Relaxed)
    }

    /// GET `url`, retrying recoverable failures
    pub async fn get(&self, url: &str, config: RequestConfig) -> Result<ApiResponse> {
        let max_tries = self.config.max_tries.max(1);
        let mut attempt = 0;

        loop {
            match self.send_once(url, &config).await {
                Ok(response) => {
                    debug!("Request succeeded: GET {url}");
                    return Ok(response);
                }
                Err(e) if e.is_retryable() && attempt + 1 < max_tries => {
                    let delay = self.calculate_backoff(attempt);
                    warn!(
                        "Request failed ({e}), attempt {}/{}, retrying in {:?}",
                        attempt + 1,
                        max_tries,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// GET `url` and return the parsed body (`Null` when empty)
    pub async fn get_json(&self, url: &str, config: RequestConfig) -> Result<Value> {
        let response = self.get(url, config).await?;
        Ok(response.body.unwrap_or(Value::Null))
    }

    async fn send_once(&self, url: &str, config: &RequestConfig) -> Result<ApiResponse> {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }

        let timeout = config.timeout.unwrap_or(self.config.timeout);
        let mut req = self.client.get(url).timeout(timeout);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in &config.headers {
            req = req.header(key.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            req = req.query(&config.query);
        }
        if let Some(ref auth) = self.authenticator {
            req = auth.apply(req).await?;
        }

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                }
            } else {
                Error::Http(e)
            }
        })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        self.inspect_rate_limit(&headers).await;

        if let Some(delay) = config.delay_after {
            tokio::time::sleep(delay).await;
        }

        let text = response.text().await?;
        let body = classify_response(status, &text)?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }

    /// React to the quota headers Zoho attaches to every response
    pub(crate) async fn inspect_rate_limit(&self, headers: &HeaderMap) {
        let limit = header_i64(headers, RATE_LIMIT_HEADER);
        let remaining = header_i64(headers, RATE_LIMIT_REMAINING_HEADER);

        if let (Some(limit), Some(remaining)) = (limit, remaining) {
            if remaining < self.config.usage_warning_threshold
                && !self.usage_alerted.swap(true, Ordering::Relaxed)
            {
                warn!(limit, remaining, "API quota is almost used up");
            }
        }

        if let Some(remaining) = remaining {
            if remaining <= 0 {
                warn!("Daily API limit reached for the account (remaining {remaining})");
                info!(?headers, "Limit reached with headers");
                if self.config.wait_for_daily_quota {
                    let wait = duration_until_next_day(chrono::Local::now().naive_local());
                    info!("Sleeping for {:?} until the start of the next day", wait);
                    tokio::time::sleep(wait).await;
                }
            }
        }
    }

    /// `initial_backoff * backoff_base^attempt`, capped at `max_backoff`
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let factor = self.config.backoff_base.saturating_pow(attempt);
        let delay = self.config.initial_backoff.saturating_mul(factor);
        std::cmp::min(delay, self.config.max_backoff)
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .field("has_authenticator", &self.authenticator.is_some())
            .field("has_rate_limiter", &self.rate_limiter.is_some())
            .finish_non_exhaustive()
    }
}

/// Map a status and body to a parsed body or a retriable/fatal error
pub fn classify_response(status: u16, text: &str) -> Result<Option<Value>> {
    match status {
        400 | 429 | 500..=599 => Err(Error::retriable(status, text)),
        401..=499 => Err(Error::fatal(status, text)),
        _ if text.trim().is_empty() => Ok(None),
        _ => serde_json::from_str(text).map(Some).map_err(|e| {
            error!("Received a non-json response: {text}");
            Error::retriable(status, format!("Received a non-json response: {e}"))
        }),
    }
}

fn header_i64(headers: &HeaderMap, name: &str) -> Option<i64> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}
