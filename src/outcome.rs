//! Result translation
//!
//! Every operation ends here. [`Outcome`] is the single tagged result the
//! caller sees; [`ToolResponse`] is its serializable rendering. Nothing in
//! this module panics or propagates errors.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Classification of a failed outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Config,
    InvalidParams,
    NotFound,
    Timeout,
    ApiError,
    NetworkError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Config => "config",
            ErrorKind::InvalidParams => "invalid_params",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Timeout => "timeout",
            ErrorKind::ApiError => "api_error",
            ErrorKind::NetworkError => "network_error",
        };
        f.write_str(label)
    }
}

/// Tagged result of one operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Success(T),
    /// Missing or invalid configuration; fatal to the process
    ConfigError { message: String },
    InvalidParams { message: String },
    NotFound { message: String },
    Timeout { message: String },
    ApiError { status: u16, message: String },
    NetworkError { message: String },
}

impl<T> Outcome<T> {
    /// Check if this is a success
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Only configuration failures stop the whole process
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Failure classification, `None` on success
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Success(_) => None,
            Self::ConfigError { .. } => Some(ErrorKind::Config),
            Self::InvalidParams { .. } => Some(ErrorKind::InvalidParams),
            Self::NotFound { .. } => Some(ErrorKind::NotFound),
            Self::Timeout { .. } => Some(ErrorKind::Timeout),
            Self::ApiError { .. } => Some(ErrorKind::ApiError),
            Self::NetworkError { .. } => Some(ErrorKind::NetworkError),
        }
    }

    /// Human-readable failure message, `None` on success
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::ConfigError { message }
            | Self::InvalidParams { message }
            | Self::NotFound { message }
            | Self::Timeout { message }
            | Self::ApiError { message, .. }
            | Self::NetworkError { message } => Some(message),
        }
    }

    /// Map the success value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Outcome<U> {
        match self {
            Self::Success(value) => Outcome::Success(f(value)),
            Self::ConfigError { message } => Outcome::ConfigError { message },
            Self::InvalidParams { message } => Outcome::InvalidParams { message },
            Self::NotFound { message } => Outcome::NotFound { message },
            Self::Timeout { message } => Outcome::Timeout { message },
            Self::ApiError { status, message } => Outcome::ApiError { status, message },
            Self::NetworkError { message } => Outcome::NetworkError { message },
        }
    }
}

impl<T> From<Error> for Outcome<T> {
    fn from(err: Error) -> Self {
        let message = err.to_string();
        match err {
            Error::Config { .. } | Error::InvalidUrl(_) => Self::ConfigError { message },
            Error::InvalidParams { .. } => Self::InvalidParams { message },
            Error::NotFound { .. } => Self::NotFound { message },
            Error::Timeout { .. } => Self::Timeout { message },
            Error::Api { status, .. } => Self::ApiError { status, message },
            Error::Network { .. } | Error::Json(_) => Self::NetworkError { message },
        }
    }
}

impl<T> From<Result<T>> for Outcome<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(err) => err.into(),
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Successful payload: a textual summary and the structured data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolPayload {
    pub summary: String,
    pub data: Value,
}

impl ToolPayload {
    /// Create a payload
    pub fn new(summary: impl Into<String>, data: Value) -> Self {
        Self {
            summary: summary.into(),
            data,
        }
    }
}

/// Structured failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolError {
    pub kind: ErrorKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
}

/// What the invocation surface hands back to its caller
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Success(ToolPayload),
    Failure { error: ToolError },
}

impl ToolResponse {
    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }
}

impl From<Outcome<ToolPayload>> for ToolResponse {
    fn from(outcome: Outcome<ToolPayload>) -> Self {
        match outcome {
            Outcome::Success(payload) => Self::Success(payload),
            failure => {
                let status = match &failure {
                    Outcome::ApiError { status, .. } => Some(*status),
                    _ => None,
                };
                Self::Failure {
                    error: ToolError {
                        kind: failure.kind().unwrap_or(ErrorKind::NetworkError),
                        status,
                        message: failure.message().unwrap_or_default().to_string(),
                    },
                }
            }
        }
    }
}
