//! Application configuration
//!
//! Configuration is read once at startup from the environment (with `.env`
//! support via dotenvy). The GraphQL endpoint has a development default; the
//! identity-provider settings are required.

use crate::error::{AppError, AppResult};

/// Environment variable for the GraphQL endpoint URL
pub const ENV_GRAPHQL_URL: &str = "BOOKSHELF_GRAPHQL_URL";
/// Environment variable for the identity provider domain
pub const ENV_AUTH_DOMAIN: &str = "BOOKSHELF_AUTH_DOMAIN";
/// Environment variable for the OAuth client identifier
pub const ENV_AUTH_CLIENT_ID: &str = "BOOKSHELF_AUTH_CLIENT_ID";
/// Environment variable for the API audience identifier
pub const ENV_AUTH_AUDIENCE: &str = "BOOKSHELF_AUTH_AUDIENCE";
/// Environment variable for the OAuth loopback callback port
pub const ENV_CALLBACK_PORT: &str = "BOOKSHELF_CALLBACK_PORT";

/// Default GraphQL endpoint for local development
pub const DEFAULT_GRAPHQL_URL: &str = "http://localhost:4000/graphql";
/// Default loopback port for the OAuth callback server
pub const DEFAULT_CALLBACK_PORT: u16 = 8533;

/// Startup configuration for the application
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// GraphQL query/mutation endpoint
    pub graphql_url: String,
    /// Identity provider domain, e.g. `my-tenant.eu.auth0.com`
    pub auth_domain: String,
    /// OAuth client identifier
    pub auth_client_id: String,
    /// Audience identifier for access tokens
    pub auth_audience: String,
    /// Local port the OAuth callback server binds to
    pub callback_port: u16,
}

impl AppConfig {
    /// Read configuration from the process environment.
    ///
    /// Loads `.env` first if present, so local development does not need the
    /// variables exported in the shell.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Split out from [`from_env`](AppConfig::from_env) so validation can be
    /// tested without mutating process-global environment state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let required = |key: &str| -> AppResult<String> {
            match lookup(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(AppError::missing_config(key)),
            }
        };

        let graphql_url = lookup(ENV_GRAPHQL_URL)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string());

        let callback_port = match lookup(ENV_CALLBACK_PORT) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::invalid_config(ENV_CALLBACK_PORT, "not a valid port"))?,
            None => DEFAULT_CALLBACK_PORT,
        };

        Ok(Self {
            graphql_url,
            auth_domain: required(ENV_AUTH_DOMAIN)?,
            auth_client_id: required(ENV_AUTH_CLIENT_ID)?,
            auth_audience: required(ENV_AUTH_AUDIENCE)?,
            callback_port,
        })
    }

    /// Base URL of the identity provider, e.g. `https://my-tenant.eu.auth0.com`
    pub fn issuer_url(&self) -> String {
        format!("https://{}", self.auth_domain)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            (ENV_GRAPHQL_URL, "https://api.example.com/graphql"),
            (ENV_AUTH_DOMAIN, "tenant.eu.auth0.com"),
            (ENV_AUTH_CLIENT_ID, "client123"),
            (ENV_AUTH_AUDIENCE, "https://api.example.com"),
            (ENV_CALLBACK_PORT, "9100"),
        ])
    }

    #[test]
    fn test_full_configuration() {
        let vars = full_env();
        let config = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();

        assert_eq!(config.graphql_url, "https://api.example.com/graphql");
        assert_eq!(config.auth_domain, "tenant.eu.auth0.com");
        assert_eq!(config.auth_client_id, "client123");
        assert_eq!(config.auth_audience, "https://api.example.com");
        assert_eq!(config.callback_port, 9100);
        assert_eq!(config.issuer_url(), "https://tenant.eu.auth0.com");
    }

    #[test]
    fn test_defaults_applied() {
        let mut vars = full_env();
        vars.remove(ENV_GRAPHQL_URL);
        vars.remove(ENV_CALLBACK_PORT);

        let config = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.graphql_url, DEFAULT_GRAPHQL_URL);
        assert_eq!(config.callback_port, DEFAULT_CALLBACK_PORT);
    }

    #[test]
    fn test_missing_domain_is_an_error() {
        let mut vars = full_env();
        vars.remove(ENV_AUTH_DOMAIN);

        let err = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains(ENV_AUTH_DOMAIN));
    }

    #[test]
    fn test_blank_client_id_is_an_error() {
        let mut vars = full_env();
        vars.insert(ENV_AUTH_CLIENT_ID.to_string(), "   ".to_string());

        let err = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let mut vars = full_env();
        vars.insert(ENV_CALLBACK_PORT.to_string(), "not-a-port".to_string());

        let err = AppConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(matches!(err, AppError::InvalidConfig { .. }));
    }
}
