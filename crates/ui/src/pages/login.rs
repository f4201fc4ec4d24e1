//! Landing page for unauthenticated users.
//!
//! Offers sign-in and sign-up, both delegated to the identity provider via
//! the system browser.

use dioxus::prelude::*;

use bookshelf_auth::LoginPrompt;

use crate::state::{APP_STATE, start_login};

/// Landing/login page
#[component]
pub fn LoginPage() -> Element {
    let login_busy = APP_STATE.read().auth.login_in_flight;

    rsx! {
        div {
            class: "login-page",

            // Hero
            span { class: "login-hero-icon", "📚" }
            h1 { class: "login-title", "Books Management" }
            p {
                class: "login-description",
                "A simple dashboard for managing your book collection. Sign in to create, edit, and organize your books."
            }

            // Auth buttons
            div {
                class: "login-actions",

                button {
                    class: "btn btn-primary btn-wide",
                    disabled: login_busy,
                    onclick: move |_| start_login(LoginPrompt::SignIn),
                    if login_busy { "Waiting for browser..." } else { "Sign In" }
                }

                button {
                    class: "btn btn-primary btn-wide",
                    disabled: login_busy,
                    onclick: move |_| start_login(LoginPrompt::SignUp),
                    "Sign Up"
                }
            }

            // Features
            div {
                class: "login-features",
                p { "✓ Create and manage your book collection" }
                p { "✓ Secure authentication with your identity provider" }
                p { "✓ Real-time updates with GraphQL" }
            }
        }
    }
}
