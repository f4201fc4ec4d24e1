//! PKCE code generation for the authorization-code flow.
//!
//! Implements RFC 7636: a random code verifier plus its S256 challenge,
//! and opaque `state` values for CSRF protection.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// PKCE verifier/challenge pair for one authorization request
#[derive(Debug, Clone)]
pub struct PkceCodes {
    /// The plaintext verifier, sent with the token exchange
    pub verifier: String,
    /// The S256 challenge, sent with the authorization request
    pub challenge: String,
}

impl PkceCodes {
    /// Generate a fresh verifier and its matching challenge
    pub fn generate() -> Self {
        let mut bytes = [0u8; 64];
        rand::rng().fill_bytes(&mut bytes);

        let verifier = URL_SAFE_NO_PAD.encode(bytes);
        let challenge = URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()));

        Self {
            verifier,
            challenge,
        }
    }
}

/// Generate an opaque `state` value for the authorization request
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_challenge_matches_verifier() {
        let pkce = PkceCodes::generate();
        let expected = URL_SAFE_NO_PAD.encode(Sha256::digest(pkce.verifier.as_bytes()));
        assert_eq!(pkce.challenge, expected);
    }

    #[test]
    fn test_verifier_is_url_safe() {
        let pkce = PkceCodes::generate();
        // RFC 7636 requires 43..=128 characters from the unreserved set
        assert!(pkce.verifier.len() >= 43 && pkce.verifier.len() <= 128);
        assert!(
            pkce.verifier
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }

    #[test]
    fn test_codes_are_unique() {
        let a = PkceCodes::generate();
        let b = PkceCodes::generate();
        assert_ne!(a.verifier, b.verifier);
        assert_ne!(a.challenge, b.challenge);
    }

    #[test]
    fn test_state_is_unique_and_url_safe() {
        let a = generate_state();
        let b = generate_state();
        assert_ne!(a, b);
        assert!(
            a.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
    }
}
