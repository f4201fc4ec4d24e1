//! HTTP operations against the identity provider.
//!
//! Handles the token endpoint (code exchange and refresh) and the
//! userinfo endpoint.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use bookshelf_core::UserProfile;

use crate::error::{AuthError, AuthResult};
use crate::pkce::PkceCodes;
use crate::token::TokenSet;

/// Default expiry applied when the token endpoint omits `expires_in`
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    id_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl TokenResponse {
    fn into_token_set(self) -> TokenSet {
        TokenSet::new(
            self.access_token,
            self.id_token,
            self.refresh_token,
            self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS),
        )
    }
}

/// Exchange an authorization code for tokens.
pub async fn exchange_code_for_tokens(
    issuer: &str,
    client_id: &str,
    redirect_uri: &str,
    pkce: &PkceCodes,
    code: &str,
) -> AuthResult<TokenSet> {
    let client = Client::new();

    let body = format!(
        "grant_type=authorization_code&code={}&redirect_uri={}&client_id={}&code_verifier={}",
        urlencoding::encode(code),
        urlencoding::encode(redirect_uri),
        urlencoding::encode(client_id),
        urlencoding::encode(&pkce.verifier)
    );

    let response = client
        .post(format!("{issuer}/oauth/token"))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(body)
        .timeout(Duration::from_secs(30))
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenExchange(format!("status {status}: {text}")));
    }

    let tokens: TokenResponse = response
        .json()
        .await
        .map_err(|e| AuthError::TokenExchange(format!("invalid response: {e}")))?;

    Ok(tokens.into_token_set())
}

/// Refresh an access token using a refresh token.
///
/// The provider may omit a rotated refresh token from the response; in that
/// case the one used for the request is carried over.
pub async fn refresh_access_token(
    issuer: &str,
    client_id: &str,
    refresh_token: &str,
) -> AuthResult<TokenSet> {
    let client = Client::new();

    #[derive(Serialize)]
    struct RefreshRequest<'a> {
        grant_type: &'static str,
        client_id: &'a str,
        refresh_token: &'a str,
    }

    let request = RefreshRequest {
        grant_type: "refresh_token",
        client_id,
        refresh_token,
    };

    let response = client
        .post(format!("{issuer}/oauth/token"))
        .header(CONTENT_TYPE, "application/json")
        .json(&request)
        .timeout(Duration::from_secs(30))
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenRefresh(format!("status {status}: {text}")));
    }

    let tokens: TokenResponse = response
        .json()
        .await
        .map_err(|e| AuthError::TokenRefresh(format!("invalid response: {e}")))?;

    let mut token_set = tokens.into_token_set();
    if token_set.refresh_token.is_none() {
        token_set.refresh_token = Some(refresh_token.to_string());
    }

    Ok(token_set)
}

/// Fetch the authenticated user's profile from the userinfo endpoint.
pub async fn fetch_user_profile(issuer: &str, access_token: &str) -> AuthResult<UserProfile> {
    let client = Client::new();

    let response = client
        .get(format!("{issuer}/userinfo"))
        .bearer_auth(access_token)
        .timeout(Duration::from_secs(30))
        .send()
        .await
        .map_err(|e| AuthError::Network(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        return Err(AuthError::Network(format!("userinfo returned {status}")));
    }

    response
        .json::<UserProfile>()
        .await
        .map_err(|e| AuthError::InvalidToken(format!("invalid userinfo response: {e}")))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_defaults_expiry() {
        let json = r#"{ "access_token": "at" }"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        let tokens = response.into_token_set();

        assert_eq!(tokens.access_token, "at");
        assert!(tokens.id_token.is_none());
        assert!(!tokens.is_expired());
    }

    #[test]
    fn test_token_response_full() {
        let json = r#"{
            "access_token": "at",
            "id_token": "idt",
            "refresh_token": "rt",
            "expires_in": 86400,
            "token_type": "Bearer"
        }"#;
        let response: TokenResponse = serde_json::from_str(json).unwrap();
        let tokens = response.into_token_set();

        assert_eq!(tokens.id_token.as_deref(), Some("idt"));
        assert_eq!(tokens.refresh_token.as_deref(), Some("rt"));
        assert!(!tokens.is_expired());
    }
}
