//! Error types for lifelog-query
//!
//! This module defines the error hierarchy for the whole crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde_json::Value;
use thiserror::Error;

/// The main error type for lifelog-query
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("Lifelog '{id}' not found")]
    NotFound { id: String },

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("API error (HTTP {status}): {}", render_body(.body))]
    Api { status: u16, body: Value },

    #[error("Network error: {message}")]
    Network { message: String },

    // ============================================================================
    // Local Errors
    // ============================================================================
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid parameters error
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Create an API error from a status and a raw response body.
    ///
    /// The body is kept as structured JSON when it parses, otherwise as text.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        let text = body.into();
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Self::Api { status, body }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Whether this error should stop the whole process rather than one operation
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::InvalidUrl(_))
    }
}

fn render_body(body: &Value) -> String {
    match body {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Result type alias for lifelog-query
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::config("LIMITLESS_API_KEY is not set");
        assert_eq!(
            err.to_string(),
            "Configuration error: LIMITLESS_API_KEY is not set"
        );

        let err = Error::not_found("abc123");
        assert_eq!(err.to_string(), "Lifelog 'abc123' not found");

        let err = Error::api(500, "upstream exploded");
        assert_eq!(err.to_string(), "API error (HTTP 500): upstream exploded");

        let err = Error::Timeout { timeout_ms: 120_000 };
        assert_eq!(err.to_string(), "Request timeout after 120000ms");
    }

    #[test]
    fn test_api_body_parsed_when_json() {
        let err = Error::api(400, r#"{"error":"bad date"}"#);
        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 400);
                assert_eq!(body, json!({"error": "bad date"}));
            }
            other => panic!("Expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_api_body_kept_as_text() {
        let err = Error::api(502, "<html>Bad Gateway</html>");
        match err {
            Error::Api { body, .. } => {
                assert_eq!(body, Value::String("<html>Bad Gateway</html>".into()));
            }
            other => panic!("Expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_is_fatal() {
        assert!(Error::config("missing key").is_fatal());

        assert!(!Error::invalid_params("limit").is_fatal());
        assert!(!Error::not_found("x").is_fatal());
        assert!(!Error::Timeout { timeout_ms: 1 }.is_fatal());
        assert!(!Error::api(500, "").is_fatal());
        assert!(!Error::network("reset").is_fatal());
    }
}
