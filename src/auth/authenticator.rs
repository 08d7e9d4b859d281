//! Authenticator implementation
//!
//! Handles applying the Zoho OAuth header to requests and managing token refresh.

use super::store::{ConfigFileTokenStore, NoopTokenStore, TokenStore};
use super::types::{CachedToken, OAuthCredentials, TokenResponse};
use crate::config::TapConfig;
use crate::error::{Error, Result};
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Authorization scheme Zoho expects in place of `Bearer`
const AUTH_SCHEME: &str = "Zoho-oauthtoken";

/// Authenticator handles applying authentication to HTTP requests
pub struct Authenticator {
    /// OAuth2 credentials
    credentials: OAuthCredentials,
    /// Cached access token
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// HTTP client for token requests
    http_client: Client,
    /// Where refreshed tokens go
    store: Arc<dyn TokenStore>,
}

impl Authenticator {
    /// Create a new authenticator with the given credentials
    pub fn new(credentials: OAuthCredentials) -> Self {
        Self::with_client(credentials, Client::new())
    }

    /// Create an authenticator with a custom HTTP client
    pub fn with_client(credentials: OAuthCredentials, http_client: Client) -> Self {
        Self {
            credentials,
            cached_token: Arc::new(RwLock::new(None)),
            http_client,
            store: Arc::new(NoopTokenStore),
        }
    }

    /// Build from tap settings, seeding the cache with any stored token
    pub fn from_config(config: &TapConfig, http_client: Client) -> Result<Self> {
        let credentials = OAuthCredentials {
            token_url: config.token_url(),
            client_id: config.client_id()?.to_string(),
            client_secret: config.client_secret()?.to_string(),
            refresh_token: config.refresh_token()?.to_string(),
            redirect_uri: config.redirect_uri().map(str::to_string),
        };

        let mut auth = Self::with_client(credentials, http_client);
        if let Some(path) = config.config_file() {
            auth = auth.with_store(ConfigFileTokenStore::new(path));
        }
        if let Some(token) = config.access_token() {
            auth = auth.with_cached_token(CachedToken::from_timestamp(token, config.expires_at()));
        }
        Ok(auth)
    }

    /// Persist refreshed tokens through `store`
    #[must_use]
    pub fn with_store(mut self, store: impl TokenStore + 'static) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Start with a token obtained earlier
    #[must_use]
    pub fn with_cached_token(mut self, token: CachedToken) -> Self {
        self.cached_token = Arc::new(RwLock::new(Some(token)));
        self
    }

    /// Apply authentication to a request builder
    pub async fn apply(&self, req: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.access_token().await?;
        let value = format!("{AUTH_SCHEME} {token}");
        Ok(req.header(reqwest::header::AUTHORIZATION, value))
    }

    /// A valid access token, refreshing if necessary
    pub async fn access_token(&self) -> Result<String> {
        // Check if we have a valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        // Need to refresh - acquire write lock
        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring write lock (another task might have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.fetch_oauth2_refresh().await?;
        if let Err(e) = self.store.save(&new_token).await {
            warn!("Could not persist refreshed token: {e}");
        }
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new access token using the refresh token flow
    async fn fetch_oauth2_refresh(&self) -> Result<CachedToken> {
        info!("Refreshing OAuth access token");

        let creds = &self.credentials;
        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("refresh_token", creds.refresh_token.as_str()),
        ];
        if let Some(redirect_uri) = creds.redirect_uri.as_deref() {
            form.push(("redirect_uri", redirect_uri));
        }

        let response = self
            .http_client
            .post(&creds.token_url)
            .form(&form)
            .send()
            .await
            .map_err(Error::Http)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::token_refresh(format!(
                "Refresh token request failed with status {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response.json().await.map_err(Error::Http)?;
        match token_response {
            TokenResponse {
                access_token: Some(token),
                expires_in,
                ..
            } => {
                let token = match expires_in {
                    Some(secs) => CachedToken::expires_in(token, secs),
                    None => CachedToken::new(token, None),
                };
                info!(expires_at = ?token.expires_at, "OAuth access token refreshed");
                Ok(token)
            }
            TokenResponse { error, .. } => Err(Error::token_refresh(format!(
                "Token endpoint returned no access_token: {}",
                error.as_deref().unwrap_or("unknown error")
            ))),
        }
    }

    /// Clear the cached token, forcing a refresh on next use
    pub async fn clear_cache(&self) {
        let mut cached = self.cached_token.write().await;
        *cached = None;
    }

    /// OAuth2 credentials in use
    pub fn credentials(&self) -> &OAuthCredentials {
        &self.credentials
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator")
            .field("token_url", &self.credentials.token_url)
            .field("client_id", &self.credentials.client_id)
            .finish_non_exhaustive()
    }
}
