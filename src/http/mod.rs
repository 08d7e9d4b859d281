//! HTTP client module
//!
//! Provides an HTTP client with retry, rate limiting and exponential backoff.
//!
//! # Features
//!
//! - **Automatic Retries**: `5 * 4^n` second backoff, capped at three minutes
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Quota Headers**: Warns when `X-Rate-Limit-Remaining` runs low and
//!   waits for the next day once it hits zero
//! - **Authentication**: Integration with auth module

mod client;
mod rate_limit;

pub use client::{
    classify_response, ApiResponse, HttpClient, HttpClientConfig, RequestConfig,
    RATE_LIMIT_HEADER, RATE_LIMIT_REMAINING_HEADER,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
