//! Interactive login via the system browser.
//!
//! The flow:
//! 1. Generate PKCE codes and a `state` value
//! 2. Start a loopback HTTP server for the OAuth callback
//! 3. Open the browser on the provider's authorization URL
//! 4. Wait for the callback, verify `state`, and exchange the code for tokens

use std::time::{Duration, Instant};

use tiny_http::{Header, Response, Server};

use crate::AuthConfig;
use crate::client::exchange_code_for_tokens;
use crate::error::{AuthError, AuthResult};
use crate::pkce::{PkceCodes, generate_state};
use crate::token::TokenSet;

/// Scopes requested from the identity provider.
/// `offline_access` yields a refresh token for silent renewal.
pub const SCOPE: &str = "openid profile email offline_access";

/// How long the loopback server waits for the browser to come back
pub const LOGIN_TIMEOUT: Duration = Duration::from_secs(300);

/// Path the provider redirects back to on the loopback server
const CALLBACK_PATH: &str = "/callback";

// ============================================================================
// Prompt
// ============================================================================

/// Which flavor of the hosted login page to request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginPrompt {
    /// Regular sign-in
    SignIn,
    /// Sign-in with the provider's "create an account" hint
    SignUp,
}

impl LoginPrompt {
    /// The `screen_hint` parameter for the authorization request, if any
    pub fn screen_hint(&self) -> Option<&'static str> {
        match self {
            LoginPrompt::SignIn => None,
            LoginPrompt::SignUp => Some("signup"),
        }
    }
}

// ============================================================================
// URL Builders
// ============================================================================

/// Build the provider's `/authorize` URL for one login attempt
pub fn build_authorize_url(
    config: &AuthConfig,
    redirect_uri: &str,
    pkce: &PkceCodes,
    state: &str,
    prompt: LoginPrompt,
) -> String {
    let mut params = vec![
        ("response_type", "code".to_string()),
        ("client_id", config.client_id.clone()),
        ("redirect_uri", redirect_uri.to_string()),
        ("audience", config.audience.clone()),
        ("scope", SCOPE.to_string()),
        ("state", state.to_string()),
        ("code_challenge", pkce.challenge.clone()),
        ("code_challenge_method", "S256".to_string()),
    ];

    if let Some(hint) = prompt.screen_hint() {
        params.push(("screen_hint", hint.to_string()));
    }

    let query = params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    format!("{}/authorize?{}", config.issuer(), query)
}

/// Build the provider's logout URL, redirecting back to the app's origin
pub fn build_logout_url(config: &AuthConfig, return_to: &str) -> String {
    format!(
        "{}/v2/logout?client_id={}&returnTo={}",
        config.issuer(),
        urlencoding::encode(&config.client_id),
        urlencoding::encode(return_to)
    )
}

// ============================================================================
// Login Flow
// ============================================================================

/// Run the interactive login flow and return the resulting token set.
pub async fn login(config: &AuthConfig, prompt: LoginPrompt) -> AuthResult<TokenSet> {
    let pkce = PkceCodes::generate();
    let state = generate_state();

    let server =
        Server::http(("127.0.0.1", config.callback_port)).map_err(|e| AuthError::PortBinding {
            port: config.callback_port,
            reason: e.to_string(),
        })?;

    let port = server
        .server_addr()
        .to_ip()
        .map(|addr| addr.port())
        .unwrap_or(config.callback_port);

    let redirect_uri = format!("http://localhost:{port}{CALLBACK_PATH}");
    let auth_url = build_authorize_url(config, &redirect_uri, &pkce, &state, prompt);

    tracing::info!("Opening browser for sign-in");
    if webbrowser::open(&auth_url).is_err() {
        tracing::warn!("Could not open a browser; visit {} manually", auth_url);
    }

    let expected_state = state.clone();
    let code = tokio::task::spawn_blocking(move || wait_for_callback(&server, &expected_state))
        .await
        .map_err(|e| AuthError::Network(format!("callback task failed: {e}")))??;

    exchange_code_for_tokens(
        &config.issuer(),
        &config.client_id,
        &redirect_uri,
        &pkce,
        &code,
    )
    .await
}

/// Outcome of parsing one request that hit the loopback server
#[derive(Debug)]
enum CallbackOutcome {
    /// A valid callback carrying the authorization code
    Code(String),
    /// A callback that terminates the flow with an error
    Failed(AuthError),
    /// Unrelated request (favicon and friends); keep waiting
    Ignore,
}

/// Block until the provider redirects back with a code, or the flow times out.
fn wait_for_callback(server: &Server, expected_state: &str) -> AuthResult<String> {
    let deadline = Instant::now() + LOGIN_TIMEOUT;

    loop {
        let remaining = deadline
            .checked_duration_since(Instant::now())
            .ok_or(AuthError::Cancelled)?;

        let Some(request) = server.recv_timeout(remaining)? else {
            return Err(AuthError::Cancelled);
        };

        match parse_callback(request.url(), expected_state) {
            CallbackOutcome::Code(code) => {
                respond_html(
                    request,
                    200,
                    "Signed in. You can close this window and return to Bookshelf.",
                );
                return Ok(code);
            }
            CallbackOutcome::Failed(err) => {
                respond_html(request, 400, &format!("Sign-in failed: {err}"));
                return Err(err);
            }
            CallbackOutcome::Ignore => {
                let _ = request.respond(Response::from_string("Not Found").with_status_code(404));
            }
        }
    }
}

/// Classify one request URL against the expected callback shape
fn parse_callback(raw_url: &str, expected_state: &str) -> CallbackOutcome {
    let Ok(parsed) = url::Url::parse(&format!("http://localhost{raw_url}")) else {
        return CallbackOutcome::Ignore;
    };

    if parsed.path() != CALLBACK_PATH {
        return CallbackOutcome::Ignore;
    }

    let params: std::collections::HashMap<String, String> =
        parsed.query_pairs().into_owned().collect();

    if let Some(error) = params.get("error") {
        let description = params
            .get("error_description")
            .cloned()
            .unwrap_or_else(|| error.clone());
        return CallbackOutcome::Failed(AuthError::Denied(description));
    }

    if params.get("state").map(String::as_str) != Some(expected_state) {
        return CallbackOutcome::Failed(AuthError::StateMismatch);
    }

    match params.get("code").filter(|c| !c.is_empty()) {
        Some(code) => CallbackOutcome::Code(code.clone()),
        None => CallbackOutcome::Failed(AuthError::MissingCode),
    }
}

/// Send a minimal HTML page back to the browser
fn respond_html(request: tiny_http::Request, status: u16, message: &str) {
    let body = format!(
        "<!DOCTYPE html><html><body style=\"font-family: sans-serif; text-align: center; padding-top: 4rem;\"><h2>Bookshelf</h2><p>{message}</p></body></html>"
    );

    let mut response = Response::from_string(body).with_status_code(status);
    if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"text/html; charset=utf-8"[..]) {
        response = response.with_header(header);
    }

    let _ = request.respond(response);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AuthConfig {
        AuthConfig::new(
            "tenant.eu.auth0.com",
            "client123",
            "https://api.example.com",
            8533,
        )
    }

    #[test]
    fn test_authorize_url_carries_all_params() {
        let pkce = PkceCodes::generate();
        let url = build_authorize_url(
            &test_config(),
            "http://localhost:8533/callback",
            &pkce,
            "state-xyz",
            LoginPrompt::SignIn,
        );

        assert!(url.starts_with("https://tenant.eu.auth0.com/authorize?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=client123"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A8533%2Fcallback"));
        assert!(url.contains("audience=https%3A%2F%2Fapi.example.com"));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains(&format!("code_challenge={}", pkce.challenge)));
        assert!(url.contains("state=state-xyz"));
        assert!(!url.contains("screen_hint"));
    }

    #[test]
    fn test_sign_up_adds_screen_hint() {
        let pkce = PkceCodes::generate();
        let url = build_authorize_url(
            &test_config(),
            "http://localhost:8533/callback",
            &pkce,
            "s",
            LoginPrompt::SignUp,
        );

        assert!(url.contains("screen_hint=signup"));
    }

    #[test]
    fn test_logout_url() {
        let url = build_logout_url(&test_config(), "http://localhost:8533");

        assert_eq!(
            url,
            "https://tenant.eu.auth0.com/v2/logout?client_id=client123&returnTo=http%3A%2F%2Flocalhost%3A8533"
        );
    }

    #[test]
    fn test_parse_callback_happy_path() {
        let outcome = parse_callback("/callback?code=abc&state=xyz", "xyz");
        assert!(matches!(outcome, CallbackOutcome::Code(code) if code == "abc"));
    }

    #[test]
    fn test_parse_callback_state_mismatch() {
        let outcome = parse_callback("/callback?code=abc&state=wrong", "xyz");
        assert!(matches!(
            outcome,
            CallbackOutcome::Failed(AuthError::StateMismatch)
        ));
    }

    #[test]
    fn test_parse_callback_missing_code() {
        let outcome = parse_callback("/callback?state=xyz", "xyz");
        assert!(matches!(
            outcome,
            CallbackOutcome::Failed(AuthError::MissingCode)
        ));
    }

    #[test]
    fn test_parse_callback_provider_error() {
        let outcome = parse_callback(
            "/callback?error=access_denied&error_description=User%20cancelled",
            "xyz",
        );
        match outcome {
            CallbackOutcome::Failed(AuthError::Denied(msg)) => {
                assert_eq!(msg, "User cancelled");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn test_parse_callback_ignores_unrelated_paths() {
        assert!(matches!(
            parse_callback("/favicon.ico", "xyz"),
            CallbackOutcome::Ignore
        ));
        assert!(matches!(
            parse_callback("/", "xyz"),
            CallbackOutcome::Ignore
        ));
    }
}
