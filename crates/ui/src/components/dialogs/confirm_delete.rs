//! # Delete Confirmation Dialog
//!
//! Yes/no confirmation shown before a book is deleted. The caller supplies
//! the deletion action and the busy flag; the dialog itself performs no
//! network calls and closes only through its callbacks.

use dioxus::prelude::*;

// ============================================================================
// Component Props
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct DeleteConfirmDialogProps {
    /// Display name of the book being deleted
    pub book_name: String,

    /// Whether the deletion call is in flight
    #[props(default = false)]
    pub busy: bool,

    /// Called when the user confirms the deletion
    #[props(default)]
    pub on_confirm: EventHandler<()>,

    /// Called when the user cancels
    #[props(default)]
    pub on_cancel: EventHandler<()>,
}

// ============================================================================
// Main Component
// ============================================================================

/// Confirmation dialog for deleting a book
#[component]
pub fn DeleteConfirmDialog(props: DeleteConfirmDialogProps) -> Element {
    rsx! {
        div {
            class: "dialog-pad",

            // Header with warning icon
            div {
                class: "dialog-header",
                span { class: "dialog-warning-icon", "⚠️" }
                h2 { class: "dialog-title dialog-title-danger", "Delete Book" }
            }

            p {
                class: "dialog-text",
                "Are you sure you want to delete "
                span { class: "dialog-text-strong", "\"{props.book_name}\"" }
                "? This action cannot be undone."
            }

            // Actions
            div {
                class: "dialog-actions",

                button {
                    r#type: "button",
                    class: "btn btn-ghost",
                    disabled: props.busy,
                    onclick: move |_| props.on_cancel.call(()),
                    "Cancel"
                }

                button {
                    r#type: "button",
                    class: "btn btn-danger",
                    disabled: props.busy,
                    onclick: move |_| props.on_confirm.call(()),

                    if props.busy {
                        span { class: "spinner spinner-sm" }
                        "Deleting..."
                    } else {
                        "Delete"
                    }
                }
            }
        }
    }
}
