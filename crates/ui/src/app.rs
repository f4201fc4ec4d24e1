//! Main Application Component for Bookshelf
//!
//! The root component owns the authentication state machine: it restores a
//! persisted session on startup and renders the page resolved from the
//! current auth phase (spinner while loading, login page when signed out,
//! the library when signed in).

use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::components::spinner::CenteredSpinner;
use crate::components::toaster::ToasterOverlay;
use crate::pages::{LibraryPage, LoginPage};
use crate::state::{APP_STATE, AuthPhase, Page, establish_session, resolve_page};

/// Root application component
#[component]
pub fn App() -> Element {
    // Resolve the persisted session once at startup. Failures only log; the
    // app simply starts signed out and the user can sign in again.
    use_future(move || async move {
        let client = APP_STATE.read().auth.client.clone();

        let Some(client) = client else {
            APP_STATE.write().auth.phase = AuthPhase::Unauthenticated;
            return;
        };

        match client.restore_session().await {
            Ok(Some(session)) => {
                tracing::info!("Restored previous session");
                establish_session(session);
            }
            Ok(None) => {
                APP_STATE.write().auth.phase = AuthPhase::Unauthenticated;
            }
            Err(e) => {
                tracing::error!("Session restore failed: {}", e);
                APP_STATE.write().auth.phase = AuthPhase::Unauthenticated;
            }
        }
    });

    let state = APP_STATE.read();
    let phase = state.auth.phase;
    let requested = state.ui.active_page;
    drop(state);

    rsx! {
        div {
            class: "app-container",

            Navbar {}

            main {
                class: "app-main",

                match resolve_page(phase, requested) {
                    None => rsx! { CenteredSpinner {} },
                    Some(Page::Login) => rsx! { LoginPage {} },
                    Some(Page::Library) => rsx! { LibraryPage {} },
                }
            }

            ToasterOverlay {}
        }
    }
}
