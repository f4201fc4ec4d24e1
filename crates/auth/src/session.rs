//! Persisted session storage.
//!
//! The token set and profile are saved as JSON under the platform data
//! directory so a restart resumes the authenticated state without a new
//! browser round-trip.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bookshelf_core::UserProfile;

use crate::error::{AuthError, AuthResult};
use crate::token::TokenSet;

/// Directory under the platform data dir holding Bookshelf state
const APP_DIR: &str = "bookshelf";
/// File name of the persisted session
const SESSION_FILE: &str = "session.json";

// ============================================================================
// Stored Session
// ============================================================================

/// Everything persisted for an authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    /// The token set from the identity provider
    pub tokens: TokenSet,
    /// The user profile at sign-in time
    #[serde(default)]
    pub profile: Option<UserProfile>,
    /// When this session was last written
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    /// Create a session stamped with the current time
    pub fn new(tokens: TokenSet, profile: Option<UserProfile>) -> Self {
        Self {
            tokens,
            profile,
            saved_at: Utc::now(),
        }
    }
}

// ============================================================================
// Session Store
// ============================================================================

/// File-backed store for the persisted session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Open the store at the platform's default location
    pub fn open_default() -> AuthResult<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| AuthError::Storage("no platform data directory".into()))?
            .join(APP_DIR);

        Ok(Self {
            path: dir.join(SESSION_FILE),
        })
    }

    /// Open a store at an explicit path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load the persisted session, if any
    pub fn load(&self) -> AuthResult<Option<StoredSession>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| AuthError::Storage(format!("corrupt session file: {e}")))
    }

    /// Persist a session, creating the directory if needed
    pub fn save(&self, session: &StoredSession) -> AuthResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(session)
            .map_err(|e| AuthError::Storage(format!("serialize session: {e}")))?;

        fs::write(&self.path, contents)?;
        Ok(())
    }

    /// Remove the persisted session. Missing file is not an error.
    pub fn clear(&self) -> AuthResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_session() -> StoredSession {
        StoredSession::new(
            TokenSet::new("at".into(), Some("idt".into()), Some("rt".into()), 3600),
            Some(UserProfile {
                name: Some("Ada".into()),
                email: Some("ada@example.com".into()),
                picture: None,
            }),
        )
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("nested").join("session.json"));

        let session = sample_session();
        store.save(&session).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.tokens, session.tokens);
        assert_eq!(
            loaded.profile.as_ref().unwrap().email.as_deref(),
            Some("ada@example.com")
        );
    }

    #[test]
    fn test_clear_removes_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::with_path(dir.path().join("session.json"));

        store.save(&sample_session()).unwrap();
        assert!(store.load().unwrap().is_some());

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());

        // Clearing again is a no-op
        store.clear().unwrap();
    }

    #[test]
    fn test_corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        let store = SessionStore::with_path(path);
        let err = store.load().unwrap_err();
        assert!(matches!(err, AuthError::Storage(_)));
    }
}
