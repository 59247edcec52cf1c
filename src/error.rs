// src/error.rs

//! Unified error handling for the StudyShelf client.

use std::fmt;

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// The API returned a non-success status
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Not logged in, or the session token was refused
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an API error from a status code and server message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an authentication error.
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl fmt::Display) -> Self {
        Self::Validation(message.to_string())
    }

    /// Whether this error means the caller should log in (again).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Auth(_)) || matches!(self, Self::Api { status: 401, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_formats_status_and_message() {
        let err = AppError::api(404, "material not found");
        assert_eq!(err.to_string(), "API error (404): material not found");
    }

    #[test]
    fn unauthorized_detection() {
        assert!(AppError::auth("no session").is_unauthorized());
        assert!(AppError::api(401, "token expired").is_unauthorized());
        assert!(!AppError::api(500, "boom").is_unauthorized());
    }
}
