//! # Bookshelf Auth
//!
//! OAuth identity-provider client for Bookshelf.
//!
//! This crate delegates authentication to an external OIDC provider
//! (an Auth0-style domain + client id + audience) and exposes:
//!
//! - Interactive sign-in/sign-up via the system browser with PKCE
//! - Silent access-token retrieval with refresh and persistence
//! - The authenticated user's profile
//! - Sign-out, clearing the local session and notifying the provider

pub mod client;
pub mod error;
pub mod login;
pub mod pkce;
pub mod session;
pub mod token;

// Re-export commonly used items at crate root
pub use error::{AuthError, AuthResult};
pub use login::{LoginPrompt, build_authorize_url, build_logout_url};
pub use session::{SessionStore, StoredSession};
pub use token::{TokenSet, parse_id_token_claims};

use bookshelf_core::AppConfig;

// ============================================================================
// Configuration
// ============================================================================

/// Identity-provider settings for one tenant
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    /// Provider domain, e.g. `my-tenant.eu.auth0.com`
    pub domain: String,
    /// OAuth client identifier
    pub client_id: String,
    /// Audience identifier for access tokens
    pub audience: String,
    /// Local port for the OAuth callback server
    pub callback_port: u16,
}

impl AuthConfig {
    /// Create a new provider configuration
    pub fn new(
        domain: impl Into<String>,
        client_id: impl Into<String>,
        audience: impl Into<String>,
        callback_port: u16,
    ) -> Self {
        Self {
            domain: domain.into(),
            client_id: client_id.into(),
            audience: audience.into(),
            callback_port,
        }
    }

    /// Base URL of the provider, e.g. `https://my-tenant.eu.auth0.com`
    pub fn issuer(&self) -> String {
        format!("https://{}", self.domain)
    }

    /// The app's own origin, used as the logout return target
    pub fn app_origin(&self) -> String {
        format!("http://localhost:{}", self.callback_port)
    }
}

impl From<&AppConfig> for AuthConfig {
    fn from(config: &AppConfig) -> Self {
        Self::new(
            config.auth_domain.clone(),
            config.auth_client_id.clone(),
            config.auth_audience.clone(),
            config.callback_port,
        )
    }
}

// ============================================================================
// High-Level Client
// ============================================================================

/// High-level identity-provider client tying the login flow, token refresh,
/// and session persistence together.
#[derive(Debug, Clone)]
pub struct AuthClient {
    config: AuthConfig,
    store: SessionStore,
}

impl AuthClient {
    /// Create a client using the platform-default session store
    pub fn new(config: AuthConfig) -> AuthResult<Self> {
        Ok(Self {
            store: SessionStore::open_default()?,
            config,
        })
    }

    /// Create a client with an explicit session store
    pub fn with_store(config: AuthConfig, store: SessionStore) -> Self {
        Self { config, store }
    }

    /// The provider configuration this client was built with
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Restore a persisted session, silently refreshing an expired token.
    ///
    /// Returns `Ok(None)` when there is no usable session; a failed refresh
    /// clears the stale session rather than erroring, so startup always
    /// resolves to a definite authenticated/unauthenticated answer.
    pub async fn restore_session(&self) -> AuthResult<Option<StoredSession>> {
        let Some(mut session) = self.store.load()? else {
            return Ok(None);
        };

        if session.tokens.is_expired() {
            let Some(refresh_token) = session.tokens.refresh_token.clone() else {
                self.store.clear()?;
                return Ok(None);
            };

            match client::refresh_access_token(
                &self.config.issuer(),
                &self.config.client_id,
                &refresh_token,
            )
            .await
            {
                Ok(tokens) => {
                    session.tokens = tokens;
                    self.store.save(&session)?;
                }
                Err(e) => {
                    tracing::warn!("Stored session could not be refreshed: {}", e);
                    self.store.clear()?;
                    return Ok(None);
                }
            }
        }

        Ok(Some(session))
    }

    /// Interactive sign-in via the system browser
    pub async fn sign_in(&self) -> AuthResult<StoredSession> {
        self.authenticate(LoginPrompt::SignIn).await
    }

    /// Interactive sign-up via the system browser
    pub async fn sign_up(&self) -> AuthResult<StoredSession> {
        self.authenticate(LoginPrompt::SignUp).await
    }

    async fn authenticate(&self, prompt: LoginPrompt) -> AuthResult<StoredSession> {
        let tokens = login::login(&self.config, prompt).await?;

        // Prefer the userinfo endpoint; fall back to ID-token claims
        let profile =
            match client::fetch_user_profile(&self.config.issuer(), &tokens.access_token).await {
                Ok(profile) => Some(profile),
                Err(e) => {
                    tracing::warn!("userinfo request failed: {}", e);
                    tokens
                        .id_token
                        .as_deref()
                        .and_then(|jwt| parse_id_token_claims(jwt).ok())
                }
            };

        let session = StoredSession::new(tokens, profile);
        self.store.save(&session)?;
        Ok(session)
    }

    /// Silent access-token retrieval.
    ///
    /// Returns the token set to use for the next request: the input set when
    /// still valid, otherwise a refreshed (and re-persisted) one.
    pub async fn fresh_tokens(&self, tokens: TokenSet) -> AuthResult<TokenSet> {
        if !tokens.is_expired() {
            return Ok(tokens);
        }

        let refresh_token = tokens
            .refresh_token
            .clone()
            .ok_or(AuthError::NotAuthenticated)?;

        let refreshed = client::refresh_access_token(
            &self.config.issuer(),
            &self.config.client_id,
            &refresh_token,
        )
        .await?;

        if let Ok(Some(mut session)) = self.store.load() {
            session.tokens = refreshed.clone();
            if let Err(e) = self.store.save(&session) {
                tracing::warn!("Could not persist refreshed tokens: {}", e);
            }
        }

        Ok(refreshed)
    }

    /// Sign out: clear the local session and notify the provider.
    ///
    /// Opening the provider's logout page is best-effort; the local session
    /// is gone either way.
    pub fn sign_out(&self) -> AuthResult<()> {
        self.store.clear()?;

        let url = build_logout_url(&self.config, &self.config.app_origin());
        if webbrowser::open(&url).is_err() {
            tracing::warn!("Could not open browser for provider logout");
        }

        Ok(())
    }
}

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Tests
// ============================================================================
