//! Library page: the book collection.
//!
//! Fetches the full list on mount, renders exactly one of three states
//! (error banner, loading spinner, table/empty state), and wires the editor
//! and delete-confirmation dialogs. Every successful mutation triggers a full
//! refetch; the rendered list is always the last successful fetch.

use dioxus::prelude::*;

use bookshelf_core::Book;

use crate::components::dialogs::{BookDialog, DeleteConfirmDialog, DialogShell};
use crate::components::spinner::Spinner;
use crate::state::{
    API_CLIENT, APP_STATE, Dialog, ensure_fresh_access_token, notify_error, notify_success,
};

/// Book collection page
#[component]
pub fn LibraryPage() -> Element {
    // Re-runs whenever the API client changes (e.g. bearer token applied)
    let mut books = use_resource(move || async move {
        ensure_fresh_access_token().await;
        let client = API_CLIENT.read().clone();
        client.list_books().await
    });

    let fetching = !matches!(*books.state().read(), UseResourceState::Ready);
    let mut delete_busy = use_signal(|| false);

    let active_dialog = APP_STATE.read().ui.active_dialog.clone();

    // Issue the delete call for the book in the confirmation dialog.
    // The dialog closes only on success; errors leave it open.
    let mut run_delete = move |book: Book| {
        if *delete_busy.read() {
            return;
        }
        delete_busy.set(true);

        spawn(async move {
            ensure_fresh_access_token().await;
            let client = API_CLIENT.read().clone();
            let result = client.delete_book(book.id).await;
            delete_busy.set(false);

            match result {
                Ok(_) => {
                    notify_success("Book deleted", "The book has been successfully deleted.");
                    APP_STATE.write().ui.close_dialog();
                    books.restart();
                }
                Err(e) => {
                    tracing::error!("Deleting book failed: {}", e);
                    notify_error("Error", e.user_message());
                }
            }
        });
    };

    rsx! {
        div {
            class: "library-page",

            // Header
            header {
                class: "library-header",

                div {
                    class: "library-header-row",

                    h2 { class: "library-title", "My Books" }

                    div {
                        class: "library-header-actions",

                        button {
                            class: "btn btn-icon",
                            title: "Refresh",
                            disabled: fetching,
                            onclick: move |_| books.restart(),
                            "⟳"
                        }

                        button {
                            class: "btn btn-primary",
                            onclick: move |_| {
                                APP_STATE.write().ui.show_dialog(Dialog::NewBook);
                            },
                            "+ Add Book"
                        }
                    }
                }

                p {
                    class: "library-subtitle",
                    "Manage your book collection. Create, edit, or delete books."
                }
            }

            // Exactly one of: error banner, loading spinner, table/empty state
            match &*books.read_unchecked() {
                None => rsx! {
                    div {
                        class: "library-loading",
                        Spinner {}
                        p { "Loading books..." }
                    }
                },
                Some(Err(e)) => rsx! {
                    div { class: "banner banner-error", "{e.user_message()}" }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    div {
                        class: "library-empty",
                        p { "No books yet. Click \"Add Book\" to create your first book." }
                    }
                },
                Some(Ok(list)) => rsx! {
                    div {
                        class: "table-card",
                        table {
                            class: "table",
                            thead {
                                tr {
                                    th { "ID" }
                                    th { "Name" }
                                    th { "Description" }
                                    th { "Created" }
                                    th { "Updated" }
                                    th { class: "table-actions", "Actions" }
                                }
                            }
                            tbody {
                                for book in list.iter() {
                                    BookRow { key: "{book.id}", book: book.clone() }
                                }
                            }
                        }
                    }

                    p { class: "library-total", "{total_label(list.len())}" }
                },
            }

            // Dialogs
            match active_dialog {
                Some(Dialog::NewBook) => rsx! {
                    DialogShell {
                        BookDialog {
                            key: "create",
                            on_success: move |_| {
                                APP_STATE.write().ui.close_dialog();
                                books.restart();
                            },
                        }
                    }
                },
                Some(Dialog::EditBook(book)) => rsx! {
                    DialogShell {
                        BookDialog {
                            key: "edit-{book.id}",
                            book: Some(book.clone()),
                            on_success: move |_| {
                                APP_STATE.write().ui.close_dialog();
                                books.restart();
                            },
                        }
                    }
                },
                Some(Dialog::ConfirmDelete(book)) => {
                    let target = book.clone();
                    rsx! {
                        DialogShell {
                            DeleteConfirmDialog {
                                book_name: book.name.clone(),
                                busy: delete_busy(),
                                on_confirm: move |_| run_delete(target.clone()),
                                on_cancel: move |_| {
                                    APP_STATE.write().ui.close_dialog();
                                },
                            }
                        }
                    }
                }
                None => rsx! {},
            }
        }
    }
}

/// One table row with its edit/delete actions
#[component]
fn BookRow(book: Book) -> Element {
    let edit_target = book.clone();
    let delete_target = book.clone();

    rsx! {
        tr {
            td {
                span { class: "badge", "{book.id}" }
            }
            td { class: "table-name", "{book.name}" }
            td { class: "table-description", "{book.description}" }
            td { class: "table-date", "{book.created_display()}" }
            td { class: "table-date", "{book.updated_display()}" }
            td {
                div {
                    class: "table-row-actions",

                    button {
                        class: "btn btn-icon",
                        title: "Edit",
                        onclick: move |_| {
                            APP_STATE
                                .write()
                                .ui
                                .show_dialog(Dialog::EditBook(edit_target.clone()));
                        },
                        "✏️"
                    }

                    button {
                        class: "btn btn-icon btn-icon-danger",
                        title: "Delete",
                        onclick: move |_| {
                            APP_STATE
                                .write()
                                .ui
                                .show_dialog(Dialog::ConfirmDelete(delete_target.clone()));
                        },
                        "🗑️"
                    }
                }
            }
        }
    }
}

/// Summary line under the table
fn total_label(count: usize) -> String {
    format!(
        "Total: {} book{}",
        count,
        if count == 1 { "" } else { "s" }
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_label_pluralizes() {
        assert_eq!(total_label(0), "Total: 0 books");
        assert_eq!(total_label(1), "Total: 1 book");
        assert_eq!(total_label(12), "Total: 12 books");
    }
}
