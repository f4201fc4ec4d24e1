//! # UI Components
//!
//! Reusable Dioxus components for the Bookshelf UI:
//! - **Navbar**: Persistent header with authentication controls
//! - **Inputs**: Form input components (text input, text area)
//! - **Dialogs**: Modal dialogs for creating/editing and deleting books
//! - **Toaster**: Notification overlay
//! - **Spinner**: Loading indicators

pub mod dialogs;
pub mod inputs;
pub mod navbar;
pub mod spinner;
pub mod toaster;

pub use dialogs::{BookDialog, DeleteConfirmDialog, DialogShell};
pub use inputs::{TextArea, TextInput};
pub use navbar::Navbar;
pub use spinner::{CenteredSpinner, Spinner};
pub use toaster::ToasterOverlay;
