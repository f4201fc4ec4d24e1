//! # Dialog Components
//!
//! Modal dialogs for the Bookshelf UI:
//!
//! - **BookDialog**: Create and edit books
//! - **DeleteConfirmDialog**: Confirmation for destructive deletes
//! - **DialogShell**: Shared backdrop/positioning wrapper

use dioxus::prelude::*;

use crate::state::APP_STATE;

pub mod book_dialog;
pub mod confirm_delete;

pub use book_dialog::BookDialog;
pub use confirm_delete::DeleteConfirmDialog;

/// Modal wrapper: darkened backdrop plus a centered content card.
///
/// Clicking the backdrop closes the active dialog; clicks inside the card do
/// not propagate out.
#[component]
pub fn DialogShell(children: Element) -> Element {
    rsx! {
        div {
            class: "dialog-overlay",

            div {
                class: "dialog-backdrop",
                onclick: move |_| {
                    APP_STATE.write().ui.close_dialog();
                }
            }

            div {
                class: "dialog-content",
                onclick: move |e| e.stop_propagation(),
                {children}
            }
        }
    }
}
