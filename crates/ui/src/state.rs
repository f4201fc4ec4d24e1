//! Application State Management for Bookshelf
//!
//! This module provides centralized state management using Dioxus Signals.
//! It holds the authentication phase, the active page and dialog, the
//! notification queue, and the shared API client.

use dioxus::prelude::*;

use bookshelf_api::ApiClient;
use bookshelf_auth::{AuthClient, AuthConfig, LoginPrompt, StoredSession, TokenSet};
use bookshelf_core::{AppConfig, Book, UserProfile, config::DEFAULT_GRAPHQL_URL};

// ============================================================================
// Page Navigation
// ============================================================================

/// Application pages/routes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    /// Book collection (the root route)
    #[default]
    Library,
    /// Landing page for unauthenticated users
    Login,
}

impl Page {
    /// Get the display name for this page
    pub fn display_name(&self) -> &'static str {
        match self {
            Page::Library => "My Books",
            Page::Login => "Sign In",
        }
    }
}

/// Authentication phase of the application shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthPhase {
    /// Session restore still in progress
    #[default]
    Loading,
    /// No authenticated session
    Unauthenticated,
    /// Authenticated session established
    Authenticated,
}

/// Resolve which page to render for a requested route.
///
/// `None` means the auth phase is still loading and only a spinner may be
/// shown. Unauthenticated users are redirected to the login page from every
/// route; authenticated users are redirected from the login route to the
/// library.
pub fn resolve_page(phase: AuthPhase, requested: Page) -> Option<Page> {
    match (phase, requested) {
        (AuthPhase::Loading, _) => None,
        (AuthPhase::Unauthenticated, _) => Some(Page::Login),
        (AuthPhase::Authenticated, _) => Some(Page::Library),
    }
}

// ============================================================================
// Auth State
// ============================================================================

/// Authentication state held by the shell
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    /// Current phase of the auth state machine
    pub phase: AuthPhase,
    /// Profile of the signed-in user
    pub profile: Option<UserProfile>,
    /// Current token set
    pub tokens: Option<TokenSet>,
    /// Identity-provider client (None if configuration failed)
    pub client: Option<AuthClient>,
    /// Whether an interactive login is currently in flight
    pub login_in_flight: bool,
}

impl AuthState {
    /// Whether an authenticated session is established
    pub fn is_authenticated(&self) -> bool {
        self.phase == AuthPhase::Authenticated
    }

    /// Move into the authenticated phase with the given session
    pub fn establish(&mut self, session: &StoredSession) {
        self.phase = AuthPhase::Authenticated;
        self.profile = session.profile.clone();
        self.tokens = Some(session.tokens.clone());
        self.login_in_flight = false;
    }

    /// Drop the session and return to the unauthenticated phase
    pub fn clear(&mut self) {
        self.phase = AuthPhase::Unauthenticated;
        self.profile = None;
        self.tokens = None;
        self.login_in_flight = false;
    }
}

// ============================================================================
// UI State
// ============================================================================

/// Dialog types
#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    /// Create a new book
    NewBook,
    /// Edit an existing book
    EditBook(Book),
    /// Confirm deletion of a book
    ConfirmDelete(Book),
}

/// General UI state (active page, dialogs)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    /// Currently requested page
    pub active_page: Page,
    /// Active dialog (if any)
    pub active_dialog: Option<Dialog>,
}

impl UiState {
    /// Navigate to a page
    pub fn navigate(&mut self, page: Page) {
        self.active_page = page;
    }

    /// Show a dialog
    pub fn show_dialog(&mut self, dialog: Dialog) {
        self.active_dialog = Some(dialog);
    }

    /// Close the current dialog
    pub fn close_dialog(&mut self) {
        self.active_dialog = None;
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Severity of a toast notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl ToastLevel {
    /// How long a toast of this level stays on screen
    pub fn duration(&self) -> std::time::Duration {
        match self {
            ToastLevel::Success => std::time::Duration::from_secs(3),
            ToastLevel::Error => std::time::Duration::from_secs(5),
        }
    }
}

/// A single toast notification
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub title: String,
    pub message: String,
}

/// Process-wide notification queue with explicit enqueue/dismiss.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl Toaster {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a toast; returns its id for later dismissal
    pub fn push(
        &mut self,
        level: ToastLevel,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            level,
            title: title.into(),
            message: message.into(),
        });
        id
    }

    /// Enqueue a success toast
    pub fn success(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Success, title, message)
    }

    /// Enqueue an error toast
    pub fn error(&mut self, title: impl Into<String>, message: impl Into<String>) -> u64 {
        self.push(ToastLevel::Error, title, message)
    }

    /// Remove a toast by id; unknown ids are ignored
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|t| t.id != id);
    }

    /// Currently queued toasts, oldest first
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

// ============================================================================
// Application State
// ============================================================================

/// Main application state container
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Startup configuration (None until `init_app_state` runs)
    pub config: Option<AppConfig>,
    /// Authentication state
    pub auth: AuthState,
    /// UI state
    pub ui: UiState,
    /// Notification queue
    pub toaster: Toaster,
}

impl AppState {
    /// Create new application state
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the startup configuration and build the auth client
    pub fn configure(&mut self, config: AppConfig) {
        match AuthClient::new(AuthConfig::from(&config)) {
            Ok(client) => self.auth.client = Some(client),
            Err(e) => {
                tracing::error!("Could not initialize identity provider client: {}", e);
            }
        }
        self.config = Some(config);
    }
}

// ============================================================================
// Global State
// ============================================================================

/// Global application state signal
pub static APP_STATE: GlobalSignal<AppState> = Signal::global(AppState::new);

/// Global API client.
///
/// Kept in its own signal so data fetches re-run exactly when the client
/// changes (endpoint configured or bearer token applied), not on unrelated
/// UI state writes.
pub static API_CLIENT: GlobalSignal<ApiClient> =
    Signal::global(|| ApiClient::new(DEFAULT_GRAPHQL_URL));

/// Initialize the global app state.
/// Call this once at app startup, before the first render.
pub fn init_app_state(config: AppConfig) {
    let endpoint = config.graphql_url.clone();
    APP_STATE.write().configure(config);
    *API_CLIENT.write() = ApiClient::new(endpoint);
}

// ============================================================================
// Session Transitions
// ============================================================================

/// Enter the authenticated phase and attach the bearer token to the client
pub fn establish_session(session: StoredSession) {
    let mut state = APP_STATE.write();
    state.auth.establish(&session);
    state.ui.navigate(Page::Library);
    drop(state);

    apply_access_token(&session.tokens.access_token);
}

/// Attach a bearer token to the shared API client
pub fn apply_access_token(token: &str) {
    let rebuilt = { API_CLIENT.read().clone().with_token(token) };
    *API_CLIENT.write() = rebuilt;
}

/// Leave the authenticated phase and strip the bearer token
pub fn clear_session() {
    let mut state = APP_STATE.write();
    state.auth.clear();
    state.ui.navigate(Page::Login);
    state.ui.close_dialog();
    drop(state);

    let rebuilt = {
        let mut client = API_CLIENT.read().clone();
        client.clear_token();
        client
    };
    *API_CLIENT.write() = rebuilt;
}

/// Start an interactive login flow in the background.
///
/// Only one flow runs at a time; triggering controls are disabled through
/// `login_in_flight` while it is pending.
pub fn start_login(prompt: LoginPrompt) {
    {
        let mut state = APP_STATE.write();
        if state.auth.login_in_flight {
            return;
        }
        state.auth.login_in_flight = true;
    }

    spawn(async move {
        let client = APP_STATE.read().auth.client.clone();
        let Some(client) = client else {
            APP_STATE.write().auth.login_in_flight = false;
            notify_error("Sign-in failed", "Identity provider is not configured");
            return;
        };

        let result = match prompt {
            LoginPrompt::SignIn => client.sign_in().await,
            LoginPrompt::SignUp => client.sign_up().await,
        };

        match result {
            Ok(session) => {
                tracing::info!("Signed in");
                establish_session(session);
            }
            Err(e) => {
                tracing::error!("Sign-in failed: {}", e);
                APP_STATE.write().auth.login_in_flight = false;
                notify_error("Sign-in failed", e.to_string());
            }
        }
    });
}

/// Silent access-token retrieval before an authenticated call.
///
/// Refreshes an expired token and re-attaches it to the API client. Failure
/// is logged only; the call proceeds without a fresh bearer token and the
/// server's auth error surfaces through the normal fetch/mutation error
/// paths.
///
/// Reads state via `peek` so callers inside reactive scopes do not subscribe
/// to unrelated state writes.
pub async fn ensure_fresh_access_token() {
    let (tokens, client) = {
        let state = APP_STATE.peek();
        (state.auth.tokens.clone(), state.auth.client.clone())
    };

    let (Some(tokens), Some(client)) = (tokens, client) else {
        return;
    };

    if !tokens.is_expired() {
        return;
    }

    match client.fresh_tokens(tokens).await {
        Ok(fresh) => {
            apply_access_token(&fresh.access_token);
            APP_STATE.write().auth.tokens = Some(fresh);
        }
        Err(e) => {
            tracing::error!("Could not refresh access token: {}", e);
        }
    }
}

// ============================================================================
// Notification Helpers
// ============================================================================

/// Enqueue a success toast and schedule its auto-dismissal
pub fn notify_success(title: impl Into<String>, message: impl Into<String>) {
    push_toast(ToastLevel::Success, title.into(), message.into());
}

/// Enqueue an error toast and schedule its auto-dismissal
pub fn notify_error(title: impl Into<String>, message: impl Into<String>) {
    push_toast(ToastLevel::Error, title.into(), message.into());
}

fn push_toast(level: ToastLevel, title: String, message: String) {
    let id = APP_STATE.write().toaster.push(level, title, message);

    spawn(async move {
        tokio::time::sleep(level.duration()).await;
        APP_STATE.write().toaster.dismiss(id);
    });
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_book(id: i64) -> Book {
        Book {
            id,
            name: format!("Book {id}"),
            description: "A description".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_loading_renders_only_the_spinner() {
        assert_eq!(resolve_page(AuthPhase::Loading, Page::Library), None);
        assert_eq!(resolve_page(AuthPhase::Loading, Page::Login), None);
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        assert_eq!(
            resolve_page(AuthPhase::Unauthenticated, Page::Library),
            Some(Page::Login)
        );
        assert_eq!(
            resolve_page(AuthPhase::Unauthenticated, Page::Login),
            Some(Page::Login)
        );
    }

    #[test]
    fn test_authenticated_redirects_login_to_library() {
        assert_eq!(
            resolve_page(AuthPhase::Authenticated, Page::Library),
            Some(Page::Library)
        );
        assert_eq!(
            resolve_page(AuthPhase::Authenticated, Page::Login),
            Some(Page::Library)
        );
    }

    #[test]
    fn test_ui_state_dialogs() {
        let mut ui = UiState::default();
        assert!(ui.active_dialog.is_none());

        ui.show_dialog(Dialog::NewBook);
        assert_eq!(ui.active_dialog, Some(Dialog::NewBook));

        ui.show_dialog(Dialog::EditBook(sample_book(1)));
        assert!(matches!(ui.active_dialog, Some(Dialog::EditBook(_))));

        ui.close_dialog();
        assert!(ui.active_dialog.is_none());
    }

    #[test]
    fn test_auth_state_transitions() {
        let mut auth = AuthState::default();
        assert_eq!(auth.phase, AuthPhase::Loading);
        assert!(!auth.is_authenticated());

        let session = StoredSession::new(
            TokenSet::new("at".into(), None, None, 3600),
            Some(UserProfile {
                name: Some("Ada".into()),
                email: None,
                picture: None,
            }),
        );

        auth.establish(&session);
        assert!(auth.is_authenticated());
        assert_eq!(auth.profile.as_ref().unwrap().name.as_deref(), Some("Ada"));
        assert_eq!(
            auth.tokens.as_ref().map(|t| t.access_token.as_str()),
            Some("at")
        );

        auth.clear();
        assert_eq!(auth.phase, AuthPhase::Unauthenticated);
        assert!(auth.profile.is_none());
        assert!(auth.tokens.is_none());
    }

    #[test]
    fn test_toaster_push_and_dismiss() {
        let mut toaster = Toaster::new();
        assert!(toaster.is_empty());

        let a = toaster.success("Book created", "The book has been successfully created.");
        let b = toaster.error("Error", "Not found");
        assert_eq!(toaster.toasts().len(), 2);
        assert_ne!(a, b);

        toaster.dismiss(a);
        assert_eq!(toaster.toasts().len(), 1);
        assert_eq!(toaster.toasts()[0].id, b);
        assert_eq!(toaster.toasts()[0].level, ToastLevel::Error);

        // Dismissing an unknown id is a no-op
        toaster.dismiss(999);
        assert_eq!(toaster.toasts().len(), 1);
    }

    #[test]
    fn test_toast_ids_are_not_reused() {
        let mut toaster = Toaster::new();
        let a = toaster.success("t", "m");
        toaster.dismiss(a);
        let b = toaster.success("t", "m");
        assert_ne!(a, b);
    }

    #[test]
    fn test_toast_durations() {
        assert!(ToastLevel::Error.duration() > ToastLevel::Success.duration());
    }

    #[test]
    fn test_page_display_names() {
        assert_eq!(Page::Library.display_name(), "My Books");
        assert_eq!(Page::Login.display_name(), "Sign In");
    }
}
