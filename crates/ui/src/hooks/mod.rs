//! # UI Hooks
//!
//! Custom Dioxus hooks for the Bookshelf UI.

pub mod use_form;

pub use use_form::{FormState, ValidationRule, use_form};
