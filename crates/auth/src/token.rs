//! Token types and ID-token parsing.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use bookshelf_core::UserProfile;

use crate::error::{AuthError, AuthResult};

/// Tokens are treated as expired this long before their actual expiry, so a
/// token handed to a request cannot lapse mid-flight.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// A complete token set from the identity provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSet {
    /// Access token for API requests
    pub access_token: String,
    /// OIDC ID token carrying user claims
    #[serde(default)]
    pub id_token: Option<String>,
    /// Refresh token for obtaining new access tokens
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Absolute expiry of the access token
    pub expires_at: DateTime<Utc>,
}

impl TokenSet {
    /// Build a token set from a token-endpoint response
    pub fn new(
        access_token: String,
        id_token: Option<String>,
        refresh_token: Option<String>,
        expires_in_secs: i64,
    ) -> Self {
        Self {
            access_token,
            id_token,
            refresh_token,
            expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        }
    }

    /// Whether the access token is expired (or within the safety margin)
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    /// Whether this set can be silently refreshed
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }
}

/// Parse the user profile out of an ID token.
///
/// This is an unverified decode of the JWT payload; signature validation is
/// the API server's job, the client only reads display claims from it.
pub fn parse_id_token_claims(jwt: &str) -> AuthResult<UserProfile> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::InvalidToken("JWT must have 3 parts".into()));
    }

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::InvalidToken(format!("base64 decode failed: {e}")))?;

    let payload: serde_json::Value = serde_json::from_slice(&payload_bytes)
        .map_err(|e| AuthError::InvalidToken(format!("JSON parse failed: {e}")))?;

    let claim = |key: &str| {
        payload
            .get(key)
            .and_then(|v| v.as_str())
            .map(String::from)
    };

    Ok(UserProfile {
        name: claim("name"),
        email: claim("email"),
        picture: claim("picture"),
    })
}

// ============================================================================
// Tests
// ============================================================================
