//! Application navigation bar.
//!
//! Persistent header showing the brand and the authentication state:
//! a Sign In button when signed out, the user's email/avatar with a
//! sign-out menu when signed in.

use dioxus::prelude::*;

use bookshelf_auth::LoginPrompt;

use crate::state::{APP_STATE, AuthPhase, clear_session, start_login};

/// Top navigation bar
#[component]
pub fn Navbar() -> Element {
    let state = APP_STATE.read();
    let phase = state.auth.phase;
    let profile = state.auth.profile.clone();
    let login_busy = state.auth.login_in_flight;
    drop(state);

    let mut menu_open = use_signal(|| false);

    let handle_sign_out = move |_| {
        menu_open.set(false);

        let client = APP_STATE.read().auth.client.clone();
        if let Some(client) = client {
            if let Err(e) = client.sign_out() {
                tracing::error!("Sign-out failed: {}", e);
            }
        }
        clear_session();
        tracing::info!("Signed out");
    };

    rsx! {
        nav {
            class: "navbar",

            // Brand
            div {
                class: "navbar-brand",
                span { class: "navbar-logo", "📚" }
                span { class: "navbar-title", "Books Management" }
            }

            // Auth controls
            div {
                class: "navbar-auth",

                match phase {
                    AuthPhase::Authenticated => {
                        let profile = profile.unwrap_or_default();
                        let email = profile.email.clone().unwrap_or_default();
                        let initial = profile.initial();
                        let picture = profile.picture.clone();

                        rsx! {
                            button {
                                class: "navbar-user",
                                onclick: move |_| {
                                    let open = *menu_open.read();
                                    menu_open.set(!open);
                                },

                                span { class: "navbar-email", "{email}" }

                                if let Some(picture) = picture {
                                    img {
                                        class: "navbar-avatar",
                                        src: "{picture}",
                                        alt: "User avatar",
                                    }
                                } else {
                                    span { class: "navbar-avatar navbar-avatar-fallback", "{initial}" }
                                }
                            }

                            if *menu_open.read() {
                                div {
                                    class: "navbar-menu",
                                    button {
                                        class: "navbar-menu-item",
                                        onclick: handle_sign_out,
                                        "Sign Out"
                                    }
                                }
                            }
                        }
                    }
                    AuthPhase::Unauthenticated => rsx! {
                        button {
                            class: "btn btn-primary",
                            disabled: login_busy,
                            onclick: move |_| start_login(LoginPrompt::SignIn),
                            "Sign In"
                        }
                    },
                    AuthPhase::Loading => rsx! {},
                }
            }
        }
    }
}
