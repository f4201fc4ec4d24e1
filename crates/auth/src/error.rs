//! Error types for the identity-provider client.

use thiserror::Error;

/// Errors that can occur during authentication flows
#[derive(Debug, Error)]
pub enum AuthError {
    /// Network transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// Exchanging the authorization code for tokens failed
    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    /// Refreshing the access token failed
    #[error("Token refresh failed: {0}")]
    TokenRefresh(String),

    /// A token could not be parsed
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// The OAuth callback carried an unexpected `state` value
    #[error("State mismatch in OAuth callback")]
    StateMismatch,

    /// The OAuth callback carried no authorization code
    #[error("Authorization code missing from callback")]
    MissingCode,

    /// The identity provider denied the authorization request
    #[error("Authorization denied: {0}")]
    Denied(String),

    /// The loopback callback server could not bind its port
    #[error("Failed to bind callback server on port {port}: {reason}")]
    PortBinding { port: u16, reason: String },

    /// The login flow was cancelled or timed out
    #[error("Login cancelled or timed out")]
    Cancelled,

    /// Reading or writing the persisted session failed
    #[error("Session storage error: {0}")]
    Storage(String),

    /// No authenticated session is available
    #[error("Not authenticated")]
    NotAuthenticated,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using AuthError
pub type AuthResult<T> = Result<T, AuthError>;
