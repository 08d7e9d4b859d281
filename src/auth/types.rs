//! Authentication types

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

/// Seconds before expiry at which a token is no longer used
pub const EXPIRY_BUFFER_SECS: i64 = 120;

/// Credentials for the OAuth2 refresh-token grant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredentials {
    /// Token endpoint
    pub token_url: String,
    /// OAuth2 client id
    pub client_id: String,
    /// OAuth2 client secret
    pub client_secret: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Sent with the grant when set
    pub redirect_uri: Option<String>,
}

/// Cached access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachedToken {
    /// Create a new cached token
    pub fn new(token: impl Into<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: impl Into<String>, seconds: i64) -> Self {
        Self::new(token, Some(Utc::now() + chrono::Duration::seconds(seconds)))
    }

    /// Token restored from a config's `access_token` / `expires_in` pair
    pub fn from_timestamp(token: impl Into<String>, expires_at: Option<i64>) -> Self {
        Self::new(
            token,
            expires_at.and_then(|ts| Utc.timestamp_opt(ts, 0).single()),
        )
    }

    /// Check if the token is expired (with a two minute buffer).
    ///
    /// A token with no known expiry is never trusted.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                Utc::now() + chrono::Duration::seconds(EXPIRY_BUFFER_SECS) >= expires_at
            }
            None => true,
        }
    }

    /// Expiry as a unix timestamp
    pub fn expires_at_timestamp(&self) -> Option<i64> {
        self.expires_at.map(|dt| dt.timestamp())
    }
}

/// Token endpoint response.
///
/// Zoho answers some failures with HTTP 200 and an `error` field.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod type_tests {
    use super::*;

    #[test]
    fn test_cached_token_not_expired() {
        let token = CachedToken::expires_in("test", 3600);
        assert!(!token.is_expired());
    }

    #[test]
    fn test_cached_token_expired() {
        let token = CachedToken::expires_in("test", -100);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_inside_buffer() {
        let token = CachedToken::expires_in("test", 90);
        assert!(token.is_expired());
    }

    #[test]
    fn test_cached_token_no_expiration() {
        let token = CachedToken::new("test", None);
        assert!(token.is_expired());
    }

    #[test]
    fn test_from_timestamp() {
        let token = CachedToken::from_timestamp("t", Some(1_700_000_000));
        assert_eq!(token.expires_at_timestamp(), Some(1_700_000_000));
        assert!(token.is_expired());
    }
}
