//! Toast notification overlay.
//!
//! Renders the global [`Toaster`](crate::state::Toaster) queue as a stack of
//! dismissible messages in the top-right corner. Enqueueing and auto-dismissal
//! live in `state.rs`; this component only renders the queue.

use dioxus::prelude::*;

use crate::state::{APP_STATE, ToastLevel};

/// Overlay rendering the global notification queue
#[component]
pub fn ToasterOverlay() -> Element {
    let toasts = APP_STATE.read().toaster.toasts().to_vec();

    if toasts.is_empty() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "toaster",

            for toast in toasts {
                div {
                    key: "{toast.id}",
                    class: match toast.level {
                        ToastLevel::Success => "toast toast-success",
                        ToastLevel::Error => "toast toast-error",
                    },

                    div {
                        class: "toast-body",
                        p { class: "toast-title", "{toast.title}" }
                        p { class: "toast-message", "{toast.message}" }
                    }

                    button {
                        class: "toast-dismiss",
                        aria_label: "Dismiss",
                        onclick: move |_| {
                            APP_STATE.write().toaster.dismiss(toast.id);
                        },
                        "✕"
                    }
                }
            }
        }
    }
}
