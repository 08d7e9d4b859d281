//! Request pacing
//!
//! Zoho Books allows 30 requests per minute per organization. A governor
//! token bucket spaces requests so the limit is never hit in steady state.

use governor::{DefaultDirectRateLimiter, Quota};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Requests allowed per minute and how many may go out back to back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    pub requests_per_minute: u32,
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::per_minute(30)
    }
}

impl RateLimiterConfig {
    /// Evenly spaced requests, no burst
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            burst_size: 1,
        }
    }

    #[must_use]
    pub fn with_burst(mut self, burst_size: u32) -> Self {
        self.burst_size = burst_size;
        self
    }

    /// Gap between two requests once the burst is spent
    pub fn interval(&self) -> Duration {
        Duration::from_secs(60) / self.requests_per_minute.max(1)
    }

    fn quota(&self) -> Quota {
        let rate = NonZeroU32::new(self.requests_per_minute).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::per_minute(rate).allow_burst(burst)
    }
}

/// Shared token bucket; clones pace against the same budget
#[derive(Clone)]
pub struct RateLimiter {
    limiter: Arc<DefaultDirectRateLimiter>,
}

impl RateLimiter {
    pub fn new(config: &RateLimiterConfig) -> Self {
        Self {
            limiter: Arc::new(DefaultDirectRateLimiter::direct(config.quota())),
        }
    }

    /// Wait for the next request slot
    pub async fn wait(&self) {
        self.limiter.until_ready().await;
    }

    /// Take a slot if one is free right now
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl std::fmt::Debug for RateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimiter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod rate_limit_tests {
    use super::*;

    #[test]
    fn test_default_paces_two_seconds_apart() {
        let config = RateLimiterConfig::default();
        assert_eq!(config.requests_per_minute, 30);
        assert_eq!(config.burst_size, 1);
        assert_eq!(config.interval(), Duration::from_secs(2));
    }

    #[test]
    fn test_burst_then_blocked() {
        let limiter = RateLimiter::new(&RateLimiterConfig::per_minute(60).with_burst(5));

        for _ in 0..5 {
            assert!(limiter.try_acquire());
        }
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_second_request_waits_for_slot() {
        let limiter = RateLimiter::new(&RateLimiterConfig::default());
        let clone = limiter.clone();

        limiter.wait().await;
        let second = tokio::time::timeout(Duration::from_millis(100), clone.wait()).await;
        assert!(second.is_err());
    }
}
