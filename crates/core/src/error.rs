//! Error types for Bookshelf
//!
//! This module provides unified error handling across the application,
//! covering configuration, authentication, API, and serialization failures.

use thiserror::Error;

/// The main error type for Bookshelf
#[derive(Debug, Error)]
pub enum AppError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    /// Invalid configuration value
    #[error("Invalid configuration for '{key}': {message}")]
    InvalidConfig { key: String, message: String },

    // ========================================================================
    // Authentication Errors
    // ========================================================================
    /// Authentication failed or session invalid
    #[error("Authentication error: {0}")]
    Auth(String),

    /// No authenticated session available
    #[error("Not authenticated")]
    NotAuthenticated,

    // ========================================================================
    // API Errors
    // ========================================================================
    /// The API rejected a request with a server-reported message
    #[error("API error: {0}")]
    Api(String),

    /// Network transport failure
    #[error("Network error: {0}")]
    Network(String),

    // ========================================================================
    // Serialization Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),

    /// Operation cancelled by user
    #[error("Operation cancelled")]
    Cancelled,
}

impl AppError {
    /// Create a missing-configuration error
    pub fn missing_config(key: impl Into<String>) -> Self {
        AppError::MissingConfig(key.into())
    }

    /// Create an invalid-configuration error
    pub fn invalid_config(key: impl Into<String>, msg: impl Into<String>) -> Self {
        AppError::InvalidConfig {
            key: key.into(),
            message: msg.into(),
        }
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        AppError::Auth(msg.into())
    }

    /// Create an API error
    pub fn api(msg: impl Into<String>) -> Self {
        AppError::Api(msg.into())
    }

    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        AppError::Network(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Check if this error is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            AppError::MissingConfig(_) | AppError::InvalidConfig { .. }
        )
    }

    /// Check if this error is an authentication error
    pub fn is_auth(&self) -> bool {
        matches!(self, AppError::Auth(_) | AppError::NotAuthenticated)
    }

    /// Check if this error is a network-level error
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Network(_))
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_error() {
        let err = AppError::missing_config("BOOKSHELF_AUTH_DOMAIN");
        assert!(err.is_config());
        assert!(!err.is_auth());
        assert_eq!(
            err.to_string(),
            "Missing required configuration: BOOKSHELF_AUTH_DOMAIN"
        );
    }

    #[test]
    fn test_invalid_config_error() {
        let err = AppError::invalid_config("BOOKSHELF_CALLBACK_PORT", "not a number");
        assert!(err.is_config());
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'BOOKSHELF_CALLBACK_PORT': not a number"
        );
    }

    #[test]
    fn test_auth_errors() {
        let err = AppError::auth("token expired");
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "Authentication error: token expired");

        let err = AppError::NotAuthenticated;
        assert!(err.is_auth());
        assert_eq!(err.to_string(), "Not authenticated");
    }

    #[test]
    fn test_api_error() {
        let err = AppError::api("Not found");
        assert!(!err.is_auth());
        assert_eq!(err.to_string(), "API error: Not found");
    }

    #[test]
    fn test_network_error() {
        let err = AppError::network("connection refused");
        assert!(err.is_network());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AppError = json_err.into();
        assert!(err.to_string().starts_with("JSON serialization error"));
    }
}
