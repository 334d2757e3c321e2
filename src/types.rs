// Core types and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// The result type used throughout the Nimbus SDK
pub type ApiResult<T> = Result<T, ApiError>;

/// Convert reqwest::Error to our ApiError
impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network {
            message: err.to_string(),
            source: Some(Arc::new(err) as Arc<dyn std::error::Error + Send + Sync>),
        }
    }
}

/// A secure container for API tokens that automatically zeroes memory when dropped
pub struct SecureToken {
    token: String,
}

impl SecureToken {
    /// Create a new secure API token
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        Self { token }
    }

    /// Get a reference to the underlying token
    pub fn as_str(&self) -> &str {
        &self.token
    }
}

// Implement Deref for convenience in passing to reqwest headers
impl Deref for SecureToken {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

// Implement Drop to zero memory when the token is dropped
impl Drop for SecureToken {
    fn drop(&mut self) {
        // Overwrite the string with zeros to remove sensitive data from memory
        unsafe {
            let bytes = self.token.as_bytes_mut();
            bytes.iter_mut().for_each(|b| *b = 0);
        }
    }
}

// Prevent accidental printing of API tokens in logs/debug output
impl fmt::Debug for SecureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecureToken([REDACTED])")
    }
}

// Display implementation also redacts the token
impl fmt::Display for SecureToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED API TOKEN]")
    }
}

impl Clone for SecureToken {
    fn clone(&self) -> Self {
        Self {
            token: self.token.clone(),
        }
    }
}

/// A single problem reported by the API, in the wire format
/// `{"errors": [{"field": ..., "reason": ...}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiProblem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub reason: String,
}

impl ApiProblem {
    pub fn new(field: Option<&str>, reason: impl Into<String>) -> Self {
        Self {
            field: field.map(String::from),
            reason: reason.into(),
        }
    }
}

/// A client-side schema violation for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: String,
    pub reason: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("payload failed schema validation ({} field(s))", violations.len())]
    Schema { violations: Vec<Violation> },

    #[error("API returned error: {status}")]
    Api { status: u16, errors: Vec<ApiProblem> },

    #[error("network request failed: {message}")]
    Network {
        message: String,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    #[error("failed to parse API response: {message}")]
    Parse {
        message: String,
        source_text: Option<String>,
        source: Option<Arc<dyn std::error::Error + Send + Sync>>,
    },

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("API token not provided")]
    MissingToken,
}

impl ApiError {
    pub fn schema(violations: Vec<Violation>) -> Self {
        let error = Self::Schema { violations };
        log::error!("{}", error);
        error
    }

    pub fn api(status: u16, errors: Vec<ApiProblem>) -> Self {
        let error = Self::Api { status, errors };
        log::error!("{}", error);
        error
    }

    /// An API error carrying a single reason string and no field reference.
    pub fn api_reason(status: u16, reason: impl Into<String>) -> Self {
        Self::api(status, vec![ApiProblem::new(None, reason)])
    }

    pub fn network(message: impl Into<String>) -> Self {
        let error = Self::Network {
            message: message.into(),
            source: None,
        };
        log::error!("{}", error);
        error
    }

    pub fn parse(
        message: impl Into<String>,
        source_text: Option<String>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        let error = Self::Parse {
            message: message.into(),
            source_text,
            source: source.map(|e| Arc::new(e) as Arc<dyn std::error::Error + Send + Sync>),
        };
        log::error!("{}", error);
        error
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error is the API's 404 "not found" response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    /// The HTTP status code, when the server reported one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The first reason string, suitable for inline display in a dialog.
    pub fn primary_reason(&self) -> String {
        match self {
            Self::Schema { violations } => violations
                .first()
                .map(|v| format!("{}: {}", v.field, v.reason))
                .unwrap_or_else(|| "Invalid payload.".to_string()),
            Self::Api { errors, .. } => errors
                .first()
                .map(|p| p.reason.clone())
                .unwrap_or_else(|| "An unexpected error occurred.".to_string()),
            other => other.to_string(),
        }
    }
}

/// One page of a paginated list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub page: u32,
    pub pages: u32,
    pub results: u32,
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// Helper function to sanitize error messages to prevent leaking sensitive information
pub fn sanitize_error_message(message: &str) -> String {
    // Remove any potential API tokens
    let token_pattern = regex::Regex::new(r"[A-Za-z0-9_-]{20,}")
        .unwrap_or_else(|_| regex::Regex::new(r"").unwrap());
    let sanitized = token_pattern.replace_all(message, "[REDACTED]");

    sanitized.into_owned()
}
