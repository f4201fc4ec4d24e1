//! # Book Dialog Component
//!
//! Dialog for creating and editing books.
//!
//! The mode follows the optional `book` prop: present means edit, absent
//! means create. Field values and per-field validation errors are managed by
//! the [`use_form`] hook; both fields are required and trimmed before they go
//! over the wire.

use dioxus::prelude::*;

use bookshelf_core::{Book, CreateBookInput, UpdateBookInput};

use crate::components::inputs::{TextArea, TextInput};
use crate::hooks::use_form::{ValidationRule, use_form};
use crate::state::{
    API_CLIENT, APP_STATE, ensure_fresh_access_token, notify_error, notify_success,
};

// ============================================================================
// Component Props
// ============================================================================

#[derive(Props, Clone, PartialEq)]
pub struct BookDialogProps {
    /// Book to edit; `None` switches the dialog to create mode
    #[props(default)]
    pub book: Option<Book>,

    /// Called after a successful create/update (parent refetches and closes)
    #[props(default)]
    pub on_success: EventHandler<()>,

    /// Called when the dialog is cancelled
    #[props(default)]
    pub on_cancel: EventHandler<()>,
}

// ============================================================================
// Main Component
// ============================================================================

/// Book creation and editing dialog
#[component]
pub fn BookDialog(props: BookDialogProps) -> Element {
    let is_edit = props.book.is_some();

    // Preload the entity's fields in edit mode, blank in create mode. The
    // parent keys this dialog by book id, so a different book mounts a fresh
    // instance with fresh form state.
    let (initial_name, initial_description) = initial_values(props.book.as_ref());
    let mut form = use_form(&[
        ("name", initial_name.as_str()),
        ("description", initial_description.as_str()),
    ]);
    let mut is_saving = use_signal(|| false);

    let book_for_submit = props.book.clone();
    let on_success = props.on_success;

    let mut handle_submit = move |_| {
        if *is_saving.read() {
            return;
        }

        let rules: &[(&str, ValidationRule)] = &[
            ("name", required_name),
            ("description", required_description),
        ];
        if !form.write().validate(rules) {
            return;
        }

        let (name, description) = {
            let form = form.read();
            (
                form.value("name").to_string(),
                form.value("description").to_string(),
            )
        };

        is_saving.set(true);
        let book = book_for_submit.clone();

        spawn(async move {
            ensure_fresh_access_token().await;
            let client = API_CLIENT.read().clone();

            let result = match &book {
                Some(book) => {
                    let input = UpdateBookInput::from_form(book.id, &name, &description);
                    client.update_book(&input).await
                }
                None => {
                    let input = CreateBookInput::from_form(&name, &description);
                    client.create_book(&input).await
                }
            };

            is_saving.set(false);

            match result {
                Ok(saved) => {
                    tracing::info!("Saved book '{}'", saved.name);
                    if book.is_some() {
                        notify_success("Book updated", "The book has been successfully updated.");
                    } else {
                        notify_success("Book created", "The book has been successfully created.");
                    }
                    on_success.call(());
                }
                Err(e) => {
                    tracing::error!("Saving book failed: {}", e);
                    notify_error("Error", e.user_message());
                }
            }
        });
    };

    let handle_cancel = move |_| {
        APP_STATE.write().ui.close_dialog();
        props.on_cancel.call(());
    };

    let saving = *is_saving.read();
    let title = if is_edit { "Edit Book" } else { "Add New Book" };

    rsx! {
        div {
            class: "dialog-pad",

            // Header
            div {
                class: "dialog-header",
                h2 { class: "dialog-title", "{title}" }
            }

            // Form
            form {
                class: "dialog-form",
                onsubmit: move |e| {
                    e.prevent_default();
                    handle_submit(());
                },

                TextInput {
                    value: form.read().value("name").to_string(),
                    label: "Name",
                    placeholder: "Enter book name",
                    required: true,
                    autofocus: true,
                    disabled: saving,
                    error: form.read().error("name").map(str::to_string),
                    on_change: move |value: String| {
                        form.write().handle_change("name", value);
                    },
                }

                TextArea {
                    value: form.read().value("description").to_string(),
                    label: "Description",
                    placeholder: "Enter book description",
                    rows: 4,
                    required: true,
                    disabled: saving,
                    error: form.read().error("description").map(str::to_string),
                    on_change: move |value: String| {
                        form.write().handle_change("description", value);
                    },
                }

                // Actions
                div {
                    class: "dialog-actions",

                    button {
                        r#type: "button",
                        class: "btn btn-ghost",
                        disabled: saving,
                        onclick: handle_cancel,
                        "Cancel"
                    }

                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: saving,

                        if saving {
                            span { class: "spinner spinner-sm" }
                        }
                        "{submit_label(is_edit, saving)}"
                    }
                }
            }
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Initial form values for the given mode: the entity's fields when editing,
/// empty strings when creating
fn initial_values(book: Option<&Book>) -> (String, String) {
    match book {
        Some(book) => (book.name.clone(), book.description.clone()),
        None => (String::new(), String::new()),
    }
}

/// Validation rule for the name field
fn required_name(value: &str) -> String {
    if value.trim().is_empty() {
        "Name is required".to_string()
    } else {
        String::new()
    }
}

/// Validation rule for the description field
fn required_description(value: &str) -> String {
    if value.trim().is_empty() {
        "Description is required".to_string()
    } else {
        String::new()
    }
}

/// Label of the submit button for the given mode and busy state
fn submit_label(is_edit: bool, saving: bool) -> &'static str {
    match (is_edit, saving) {
        (true, true) => "Updating...",
        (true, false) => "Update",
        (false, true) => "Creating...",
        (false, false) => "Create",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::use_form::FormState;

    fn sample_book() -> Book {
        use chrono::Utc;
        Book {
            id: 7,
            name: "Dune".to_string(),
            description: "Sci-fi novel".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_edit_mode_preloads_entity_fields() {
        let book = sample_book();
        let (name, description) = initial_values(Some(&book));
        assert_eq!(name, book.name);
        assert_eq!(description, book.description);

        let form = FormState::new(&[("name", &name), ("description", &description)]);
        assert_eq!(form.value("name"), "Dune");
        assert_eq!(form.value("description"), "Sci-fi novel");
    }

    #[test]
    fn test_create_mode_starts_blank() {
        let (name, description) = initial_values(None);
        assert_eq!(name, "");
        assert_eq!(description, "");
    }

    #[test]
    fn test_required_rules() {
        assert_eq!(required_name(""), "Name is required");
        assert_eq!(required_name("   "), "Name is required");
        assert_eq!(required_name("Dune"), "");

        assert_eq!(required_description(" \t"), "Description is required");
        assert_eq!(required_description("Sci-fi novel"), "");
    }

    #[test]
    fn test_whitespace_only_name_blocks_submission() {
        let mut form = FormState::new(&[("name", ""), ("description", "")]);
        form.handle_change("name", "   ");
        form.handle_change("description", "Sci-fi novel");

        let rules: &[(&str, ValidationRule)] = &[
            ("name", required_name),
            ("description", required_description),
        ];

        assert!(!form.validate(rules));
        assert_eq!(form.error("name"), Some("Name is required"));
    }

    #[test]
    fn test_submit_label() {
        assert_eq!(submit_label(false, false), "Create");
        assert_eq!(submit_label(false, true), "Creating...");
        assert_eq!(submit_label(true, false), "Update");
        assert_eq!(submit_label(true, true), "Updating...");
    }

    #[test]
    fn test_inputs_are_trimmed_before_submission() {
        let create = CreateBookInput::from_form("  Dune ", " Sci-fi novel  ");
        assert_eq!(create.name, "Dune");
        assert_eq!(create.description, "Sci-fi novel");

        let update = UpdateBookInput::from_form(3, "  Dune ", " Sci-fi novel  ");
        assert_eq!(update.name.as_deref(), Some("Dune"));
        assert_eq!(update.description.as_deref(), Some("Sci-fi novel"));
    }
}
