//! Error types for Postmaster operations.
//!
//! Every failed call through the transport ends up as one [`Error`]. The five
//! HTTP classifications share an [`ErrorDetails`] payload carrying the decoded
//! message together with the raw response for diagnostics.

use std::fmt;
use thiserror::Error;

/// Message used for server-side failures, where the body is never decoded.
pub const API_ERROR_MESSAGE: &str = "There was an API error.";

/// Diagnostic information attached to every HTTP-classified error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorDetails {
    /// Best-effort decoded message.
    pub message: String,
    /// Raw response text, or the transport error text when no response arrived.
    pub http_body: Option<String>,
    /// Numeric HTTP status, absent when no response was received.
    pub http_status: Option<u16>,
    /// Raw response text as it was before decoding.
    pub json_body: Option<String>,
}

impl ErrorDetails {
    /// Create details carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Attach the raw HTTP body.
    #[must_use]
    pub fn with_http_body(mut self, body: impl Into<String>) -> Self {
        self.http_body = Some(body.into());
        self
    }

    /// Attach the HTTP status code.
    #[must_use]
    pub const fn with_http_status(mut self, status: u16) -> Self {
        self.http_status = Some(status);
        self
    }

    /// Attach the undecoded response text.
    #[must_use]
    pub fn with_json_body(mut self, body: impl Into<String>) -> Self {
        self.json_body = Some(body.into());
        self
    }
}

impl fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn body_or_empty(details: &ErrorDetails) -> &str {
    details.http_body.as_deref().unwrap_or_default()
}

/// Main error type for Postmaster operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Server-side failure (status >= 500) or the server could not be reached
    #[error("API Error: {}", body_or_empty(.0))]
    Api(ErrorDetails),

    /// The request never completed for a reason other than connectivity
    #[error("Network error: {0}")]
    Network(ErrorDetails),

    /// HTTP 401
    #[error("Authentication failed: {0}")]
    Authentication(ErrorDetails),

    /// HTTP 403
    #[error("Permission denied: {0}")]
    Permission(ErrorDetails),

    /// HTTP 400
    #[error("Invalid data: {0}")]
    InvalidData(ErrorDetails),

    /// Configuration or header values that cannot be used to build a request
    #[error("Configuration error: {0}")]
    Config(String),

    /// Payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Specialized result type for Postmaster operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Api(_) => "API_ERROR",
            Self::Network(_) => "NETWORK_ERROR",
            Self::Authentication(_) => "AUTHENTICATION_ERROR",
            Self::Permission(_) => "PERMISSION_ERROR",
            Self::InvalidData(_) => "INVALID_DATA",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Diagnostic details for HTTP-classified errors.
    #[must_use]
    pub const fn details(&self) -> Option<&ErrorDetails> {
        match self {
            Self::Api(details)
            | Self::Network(details)
            | Self::Authentication(details)
            | Self::Permission(details)
            | Self::InvalidData(details) => Some(details),
            Self::Config(_) | Self::Serialization(_) => None,
        }
    }

    /// The decoded message, or the local error text.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Config(message) | Self::Serialization(message) => message,
            _ => self.details().map_or("", |d| d.message.as_str()),
        }
    }

    /// HTTP status code, when a response was received.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        self.details().and_then(|d| d.http_status)
    }

    /// Raw response body.
    #[must_use]
    pub fn http_body(&self) -> Option<&str> {
        self.details().and_then(|d| d.http_body.as_deref())
    }

    /// Raw response text before JSON decoding.
    #[must_use]
    pub fn json_body(&self) -> Option<&str> {
        self.details().and_then(|d| d.json_body.as_deref())
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(self, Self::Api(_) | Self::Network(_) | Self::Config(_))
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            // Treated as if the server had answered 500 with the error text.
            Self::Api(ErrorDetails::new(API_ERROR_MESSAGE).with_http_body(err.to_string()))
        } else {
            Self::Network(ErrorDetails::new(err.to_string()))
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid endpoint: {err}"))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Config(err.to_string())
    }
}
