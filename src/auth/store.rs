//! Persistence for refreshed tokens

use super::types::CachedToken;
use crate::error::{Error, Result, ResultExt};
use crate::types::JsonValue;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Receives every newly issued access token
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist `token`
    async fn save(&self, token: &CachedToken) -> Result<()>;
}

/// Discards tokens
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTokenStore;

#[async_trait]
impl TokenStore for NoopTokenStore {
    async fn save(&self, _token: &CachedToken) -> Result<()> {
        Ok(())
    }
}

/// Writes `access_token` and `expires_in` back into the config file,
/// leaving every other key as it was
#[derive(Debug, Clone)]
pub struct ConfigFileTokenStore {
    path: PathBuf,
}

impl ConfigFileTokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for ConfigFileTokenStore {
    async fn save(&self, token: &CachedToken) -> Result<()> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
        let mut config: JsonValue = serde_json::from_str(&contents)
            .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?;

        let Some(object) = config.as_object_mut() else {
            return Err(Error::config("config file does not contain a JSON object"));
        };
        let access_token = JsonValue::String(token.token.clone());
        object.insert("access_token".into(), access_token);
        if let Some(ts) = token.expires_at_timestamp() {
            object.insert("expires_in".into(), JsonValue::from(ts));
        }

        let contents = serde_json::to_string_pretty(&config)?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!(path = %self.path.display(), "Wrote refreshed token to config");
        Ok(())
    }
}
