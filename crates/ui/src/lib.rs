//! # Bookshelf UI
//!
//! Dioxus Desktop UI for Bookshelf.
//!
//! This crate provides the user interface for managing a personal book
//! collection:
//!
//! - Listing page with table, refresh, and empty/error/loading states
//! - Create/edit and delete-confirmation dialogs
//! - Landing page and navbar bound to the identity provider
//! - Global state: auth phase, dialogs, notification queue

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod hooks;
pub mod pages;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

// Re-export internal crates for convenience
pub use bookshelf_api;
pub use bookshelf_auth;
pub use bookshelf_core;

// Re-export main components
pub use app::App;
pub use hooks::{FormState, use_form};
pub use pages::{LibraryPage, LoginPage};
pub use state::{
    API_CLIENT, APP_STATE, AppState, AuthPhase, AuthState, Dialog, Page, Toast, ToastLevel,
    Toaster, UiState, init_app_state, resolve_page,
};

use bookshelf_core::AppConfig;

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Bookshelf";

/// Application display title
pub const TITLE: &str = "Bookshelf - Books Management";

/// CSS styles for the application, included at build time
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Bookshelf desktop application.
///
/// This is the main entry point for the Dioxus desktop app. It installs the
/// startup configuration into the global state and starts the UI.
pub fn launch(config: AppConfig) {
    tracing::info!("Starting {} v{}", NAME, VERSION);

    // Initialize application state
    init_app_state(config);

    // Build custom head with embedded CSS
    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    // Configure and launch Dioxus desktop app
    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(TITLE)
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(1100.0, 760.0))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(800.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_title() {
        assert!(TITLE.contains("Bookshelf"));
    }

    #[test]
    fn test_styles_loaded() {
        assert!(!STYLES.is_empty());
        assert!(STYLES.contains(".app-container"));
    }
}
