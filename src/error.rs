//! Error types for tap-zohobooks
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for the tap
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Token refresh failed: {message}")]
    TokenRefresh { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Status the API may recover from (400, 429, 5xx, malformed body)
    #[error("Retriable API error (HTTP {status}): {message}")]
    RetriableApi { status: u16, message: String },

    /// Status that retrying cannot fix (401-499 except 429)
    #[error("Fatal API error (HTTP {status}): {body}")]
    FatalApi { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("JSONPath error: {message}")]
    JsonPath { message: String },

    #[error("Failed to extract '{path}' from record: {message}")]
    RecordExtraction { path: String, message: String },

    #[error("No valid date format found for '{value}'")]
    InvalidDate { value: String },

    #[error("Pagination error: {message}")]
    Pagination { message: String },

    // ============================================================================
    // State / Catalog Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    #[error("Catalog error: {message}")]
    Catalog { message: String },

    #[error("Stream '{stream}' not found")]
    StreamNotFound { stream: String },

    // ============================================================================
    // Template Errors
    // ============================================================================
    #[error("Undefined variable in template: {variable}")]
    UndefinedVariable { variable: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a token refresh error
    pub fn token_refresh(message: impl Into<String>) -> Self {
        Self::TokenRefresh {
            message: message.into(),
        }
    }

    /// Create a retriable API error
    pub fn retriable(status: u16, message: impl Into<String>) -> Self {
        Self::RetriableApi {
            status,
            message: message.into(),
        }
    }

    /// Create a fatal API error
    pub fn fatal(status: u16, body: impl Into<String>) -> Self {
        Self::FatalApi {
            status,
            body: body.into(),
        }
    }

    /// Create an undefined variable error
    pub fn undefined_var(variable: impl Into<String>) -> Self {
        Self::UndefinedVariable {
            variable: variable.into(),
        }
    }

    /// Create a catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::RetriableApi { .. } | Error::Timeout { .. } => true,
            Error::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RetriableApi { status, .. } | Error::FatalApi { status, .. } => Some(*status),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for the tap
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::missing_field("refresh_token");
        assert_eq!(
            err.to_string(),
            "Missing required config field: refresh_token"
        );

        let err = Error::fatal(404, "Not found");
        assert_eq!(err.to_string(), "Fatal API error (HTTP 404): Not found");

        let err = Error::InvalidDate {
            value: "yesterday".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "No valid date format found for 'yesterday'"
        );
    }

    #[test]
    fn test_is_retryable() {
        assert!(Error::Timeout { timeout_ms: 1000 }.is_retryable());
        assert!(Error::retriable(400, "bad request").is_retryable());
        assert!(Error::retriable(503, "").is_retryable());

        assert!(!Error::fatal(401, "").is_retryable());
        assert!(!Error::fatal(404, "").is_retryable());
        assert!(!Error::config("test").is_retryable());
    }

    #[test]
    fn test_status() {
        assert_eq!(Error::retriable(429, "").status(), Some(429));
        assert_eq!(Error::fatal(403, "").status(), Some(403));
        assert_eq!(Error::config("x").status(), None);
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }
}
