//! Tap configuration
//!
//! Settings come from one or more JSON files merged left to right, or from
//! `TAP_ZOHOBOOKS_*` environment variables when `--config ENV` is passed.

use crate::dates::infer_date;
use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix for settings read from the environment
pub const ENV_PREFIX: &str = "TAP_ZOHOBOOKS_";

/// Accounts server used when neither `accounts-server` nor `uri` is set
pub const DEFAULT_ACCOUNT_SERVER: &str = "https://accounts.zoho.com";

/// API base used when the accounts server matches no known data center
pub const DEFAULT_API_URL: &str = "https://www.zohoapis.com/books/v3/";

/// Settings that must be present before syncing
pub const REQUIRED_SETTINGS: &[&str] = &["client_id", "client_secret", "refresh_token"];

/// Accounts server suffix to API domain. First match wins.
const DOMAIN_MAPPING: &[(&str, &str)] = &[
    (".com", "https://www.zohoapis.com/books/"),
    (".eu", "https://www.zohoapis.eu/books/"),
    (".in", "https://www.zohoapis.in/books/"),
    (".com.au", "https://www.zohoapis.com.au/books/"),
    (".jp", "https://www.zohoapis.jp/books/"),
    (".ca", "https://www.zohoapis.ca/books/"),
    (".com.cn", "https://www.zohoapis.com.cn/books/"),
    (".sa", "https://www.zohoapis.sa/books/"),
];

/// Where a piece of configuration comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// JSON file on disk
    File(PathBuf),
    /// `TAP_ZOHOBOOKS_*` environment variables
    Env,
}

impl ConfigSource {
    /// Interpret a `--config` argument
    pub fn parse(arg: &str) -> Self {
        if arg == "ENV" {
            Self::Env
        } else {
            Self::File(PathBuf::from(arg))
        }
    }
}

/// Merged tap settings
#[derive(Debug, Clone, Default)]
pub struct TapConfig {
    values: JsonObject,
    config_file: Option<PathBuf>,
}

impl TapConfig {
    /// Build from an in-memory JSON object
    pub fn from_value(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(values) => Ok(Self {
                values,
                config_file: None,
            }),
            other => Err(Error::config(format!(
                "config must be a JSON object, got {other}"
            ))),
        }
    }

    /// Merge all sources, later keys overriding earlier ones.
    ///
    /// The first file source is remembered as the write-back target for
    /// refreshed tokens.
    pub fn from_sources(sources: &[ConfigSource]) -> Result<Self> {
        let mut config = Self::default();

        for source in sources {
            let values = match source {
                ConfigSource::File(path) => {
                    if config.config_file.is_none() {
                        config.config_file = Some(path.clone());
                    }
                    read_config_file(path)?
                }
                ConfigSource::Env => read_env(),
            };
            debug!(?source, keys = values.len(), "Loaded config source");
            config.values.extend(values);
        }

        Ok(config)
    }

    /// Set the file refreshed tokens are written back to
    #[must_use]
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    /// Write-back target, if the config came from a file
    pub fn config_file(&self) -> Option<&Path> {
        self.config_file.as_deref()
    }

    /// Raw settings
    pub fn as_object(&self) -> &JsonObject {
        &self.values
    }

    /// Non-empty string setting
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(JsonValue::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Required string setting
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get_str(key).ok_or_else(|| Error::missing_field(key))
    }

    /// Check required settings and date formats
    pub fn validate(&self) -> Result<()> {
        for key in REQUIRED_SETTINGS {
            self.require(key)?;
        }

        for key in ["start_date", "reports_start_date"] {
            if let Some(value) = self.get_str(key) {
                infer_date(value).map_err(|e| Error::invalid_value(key, e.to_string()))?;
            }
        }

        for key in ["accounts-server", "uri"] {
            if let Some(value) = self.get_str(key) {
                url::Url::parse(value).map_err(|e| Error::invalid_value(key, e.to_string()))?;
            }
        }

        Ok(())
    }

    pub fn client_id(&self) -> Result<&str> {
        self.require("client_id")
    }

    pub fn client_secret(&self) -> Result<&str> {
        self.require("client_secret")
    }

    pub fn refresh_token(&self) -> Result<&str> {
        self.require("refresh_token")
    }

    pub fn access_token(&self) -> Option<&str> {
        self.get_str("access_token")
    }

    pub fn redirect_uri(&self) -> Option<&str> {
        self.get_str("redirect_uri")
    }

    /// Unix timestamp at which `access_token` expires.
    ///
    /// Accepts a number or a numeric string since env values are strings.
    pub fn expires_at(&self) -> Option<i64> {
        match self.values.get("expires_in")? {
            JsonValue::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            JsonValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn start_date(&self) -> Option<&str> {
        self.get_str("start_date")
    }

    pub fn reports_start_date(&self) -> Option<&str> {
        self.get_str("reports_start_date")
    }

    /// `User-Agent` header value
    pub fn user_agent(&self) -> String {
        self.get_str("user_agent").map_or_else(
            || format!("tap-zohobooks/{}", env!("CARGO_PKG_VERSION")),
            str::to_string,
        )
    }

    /// Zoho accounts server for this organization's data center
    pub fn account_server(&self) -> String {
        self.get_str("accounts-server")
            .or_else(|| self.get_str("uri"))
            .unwrap_or(DEFAULT_ACCOUNT_SERVER)
            .trim_end_matches('/')
            .to_string()
    }

    /// Books API base for the configured data center
    pub fn api_base_url(&self) -> String {
        let server = self.account_server();
        DOMAIN_MAPPING
            .iter()
            .find(|(suffix, _)| server.ends_with(suffix))
            .map(|(_, base)| format!("{base}v3/"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    /// OAuth2 token endpoint
    pub fn token_url(&self) -> String {
        format!("{}/oauth/v2/token", self.account_server())
    }
}

fn read_config_file(path: &Path) -> Result<JsonObject> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read config file: {e}")))?;
    match serde_json::from_str(&content)
        .map_err(|e| Error::config(format!("Invalid config JSON: {e}")))?
    {
        JsonValue::Object(values) => Ok(values),
        _ => Err(Error::config(format!(
            "{} does not contain a JSON object",
            path.display()
        ))),
    }
}

/// Environment variable holding `setting`
pub fn env_var_name(setting: &str) -> String {
    format!("{ENV_PREFIX}{}", setting.to_uppercase().replace('-', "_"))
}

fn read_env() -> JsonObject {
    let mut values = JsonObject::new();
    let schema = config_jsonschema();
    let Some(properties) = schema.get("properties").and_then(JsonValue::as_object) else {
        return values;
    };

    for (setting, property) in properties {
        let Ok(raw) = std::env::var(env_var_name(setting)) else {
            continue;
        };
        let integer = property.get("type") == Some(&json!("integer"));
        let value = match raw.parse::<i64>() {
            Ok(n) if integer => JsonValue::from(n),
            _ => JsonValue::String(raw),
        };
        values.insert(setting.clone(), value);
    }

    values
}

/// JSON schema of the settings, as reported by `--about`
pub fn config_jsonschema() -> JsonValue {
    json!({
        "type": "object",
        "properties": {
            "client_id": {
                "type": "string",
                "description": "OAuth2 client id"
            },
            "client_secret": {
                "type": "string",
                "description": "OAuth2 client secret",
                "secret": true,
                "writeOnly": true
            },
            "refresh_token": {
                "type": "string",
                "description": "OAuth2 refresh token",
                "secret": true,
                "writeOnly": true
            },
            "access_token": {
                "type": "string",
                "description": "Cached access token, refreshed when expired",
                "secret": true,
                "writeOnly": true
            },
            "expires_in": {
                "type": "integer",
                "description": "Unix timestamp at which access_token expires"
            },
            "redirect_uri": {
                "type": "string",
                "description": "Redirect URI registered for the client"
            },
            "accounts-server": {
                "type": "string",
                "description": "Zoho accounts server of the data center",
                "default": DEFAULT_ACCOUNT_SERVER
            },
            "uri": {
                "type": "string",
                "description": "Fallback for accounts-server"
            },
            "start_date": {
                "type": "string",
                "format": "date-time",
                "description": "Earliest modification time to sync"
            },
            "reports_start_date": {
                "type": "string",
                "format": "date",
                "description": "First day covered by report streams"
            },
            "user_agent": {
                "type": "string",
                "description": "User-Agent header sent with every request"
            }
        },
        "required": REQUIRED_SETTINGS
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use test_case::test_case;

    fn config(value: JsonValue) -> TapConfig {
        TapConfig::from_value(value).unwrap()
    }

    fn write_json(value: &JsonValue) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{value}").unwrap();
        file
    }

    #[test_case("https://accounts.zoho.com", "https://www.zohoapis.com/books/v3/"; "us")]
    #[test_case("https://accounts.zoho.eu", "https://www.zohoapis.eu/books/v3/"; "eu")]
    #[test_case("https://accounts.zoho.in", "https://www.zohoapis.in/books/v3/"; "india")]
    #[test_case("https://accounts.zoho.com.au", "https://www.zohoapis.com.au/books/v3/"; "australia")]
    #[test_case("https://accounts.zoho.jp", "https://www.zohoapis.jp/books/v3/"; "japan")]
    #[test_case("https://accounts.zohocloud.ca", "https://www.zohoapis.ca/books/v3/"; "canada")]
    #[test_case("https://accounts.zoho.com.cn", "https://www.zohoapis.com.cn/books/v3/"; "china")]
    #[test_case("https://accounts.zoho.sa", "https://www.zohoapis.sa/books/v3/"; "saudi")]
    #[test_case("https://accounts.zoho.eu/", "https://www.zohoapis.eu/books/v3/"; "trailing slash")]
    #[test_case("https://accounts.example.org", DEFAULT_API_URL; "unknown")]
    fn test_api_base_url(server: &str, expected: &str) {
        let cfg = config(json!({ "accounts-server": server }));
        assert_eq!(cfg.api_base_url(), expected);
    }

    #[test]
    fn test_account_server_fallbacks() {
        assert_eq!(config(json!({})).account_server(), DEFAULT_ACCOUNT_SERVER);
        assert_eq!(
            config(json!({ "uri": "https://accounts.zoho.eu" })).account_server(),
            "https://accounts.zoho.eu"
        );
        assert_eq!(
            config(json!({
                "uri": "https://accounts.zoho.eu",
                "accounts-server": "https://accounts.zoho.in"
            }))
            .account_server(),
            "https://accounts.zoho.in"
        );
    }

    #[test]
    fn test_token_url() {
        let cfg = config(json!({ "accounts-server": "https://accounts.zoho.eu" }));
        assert_eq!(cfg.token_url(), "https://accounts.zoho.eu/oauth/v2/token");
    }

    #[test]
    fn test_validate_missing_field() {
        let cfg = config(json!({ "client_id": "id", "client_secret": "secret" }));
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
        assert_eq!(
            err.to_string(),
            "Missing required config field: refresh_token"
        );
    }

    #[test]
    fn test_validate_bad_start_date() {
        let cfg = config(json!({
            "client_id": "id",
            "client_secret": "secret",
            "refresh_token": "refresh",
            "start_date": "not a date"
        }));
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
        assert!(err.to_string().contains("'start_date'"));
    }

    #[test]
    fn test_validate_bad_accounts_server() {
        let cfg = config(json!({
            "client_id": "id",
            "client_secret": "secret",
            "refresh_token": "refresh",
            "accounts-server": "accounts.zoho.eu"
        }));
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
        assert!(err.to_string().contains("'accounts-server'"));
    }

    #[test]
    fn test_expires_at_number_or_string() {
        let number = config(json!({ "expires_in": 1700000000 }));
        let string = config(json!({ "expires_in": "1700000000" }));
        assert_eq!(number.expires_at(), Some(1_700_000_000));
        assert_eq!(string.expires_at(), Some(1_700_000_000));
        assert_eq!(config(json!({})).expires_at(), None);
    }

    #[test]
    fn test_from_sources_merges_and_remembers_first_file() {
        let first = write_json(&json!({ "client_id": "a", "client_secret": "s" }));
        let second = write_json(&json!({ "client_id": "b", "refresh_token": "r" }));

        let cfg = TapConfig::from_sources(&[
            ConfigSource::File(first.path().to_path_buf()),
            ConfigSource::File(second.path().to_path_buf()),
        ])
        .unwrap();

        assert_eq!(cfg.client_id().unwrap(), "b");
        assert_eq!(cfg.client_secret().unwrap(), "s");
        assert_eq!(cfg.refresh_token().unwrap(), "r");
        assert_eq!(cfg.config_file(), Some(first.path()));
    }

    #[test]
    fn test_from_sources_missing_file() {
        let err = TapConfig::from_sources(&[ConfigSource::File("/nonexistent/config.json".into())])
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }

    #[test]
    fn test_from_env_source() {
        let vars = [
            ("TAP_ZOHOBOOKS_CLIENT_ID", "env-id"),
            ("TAP_ZOHOBOOKS_ACCOUNTS_SERVER", "https://accounts.zoho.eu"),
            ("TAP_ZOHOBOOKS_EXPIRES_IN", "1700000000"),
        ];
        for (name, value) in vars {
            std::env::set_var(name, value);
        }

        let cfg = TapConfig::from_sources(&[ConfigSource::Env]).unwrap();
        for (name, _) in vars {
            std::env::remove_var(name);
        }

        assert_eq!(cfg.client_id().unwrap(), "env-id");
        assert_eq!(cfg.account_server(), "https://accounts.zoho.eu");
        assert_eq!(cfg.api_base_url(), "https://www.zohoapis.eu/books/v3/");
        assert_eq!(cfg.as_object()["expires_in"], json!(1_700_000_000));
        assert!(cfg.config_file().is_none());
    }

    #[test]
    fn test_config_source_parse() {
        assert_eq!(ConfigSource::parse("ENV"), ConfigSource::Env);
        assert_eq!(
            ConfigSource::parse("config.json"),
            ConfigSource::File(PathBuf::from("config.json"))
        );
    }

    #[test]
    fn test_env_var_name() {
        assert_eq!(env_var_name("client_id"), "TAP_ZOHOBOOKS_CLIENT_ID");
        assert_eq!(
            env_var_name("accounts-server"),
            "TAP_ZOHOBOOKS_ACCOUNTS_SERVER"
        );
    }

    #[test]
    fn test_user_agent_default() {
        assert!(config(json!({})).user_agent().starts_with("tap-zohobooks/"));
        let cfg = config(json!({ "user_agent": "custom" }));
        assert_eq!(cfg.user_agent(), "custom");
    }

    #[test]
    fn test_config_jsonschema_required() {
        let schema = config_jsonschema();
        assert_eq!(
            schema["required"],
            json!(["client_id", "client_secret", "refresh_token"])
        );
        assert_eq!(schema["properties"]["refresh_token"]["secret"], json!(true));
    }
}
