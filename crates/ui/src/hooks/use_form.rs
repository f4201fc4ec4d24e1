//! # Form State Hook
//!
//! Hook for managing controlled-form state: field values plus per-field
//! validation errors.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut form = use_form(&[("name", ""), ("description", "")]);
//!
//! // Bind an input
//! TextInput {
//!     value: form.read().value("name").to_string(),
//!     error: form.read().error("name").map(str::to_string),
//!     on_change: move |v: String| form.write().handle_change("name", v),
//! }
//!
//! // Validate on submit
//! if form.write().validate(&[("name", required_name)]) {
//!     // all rules passed
//! }
//! ```

use std::collections::HashMap;

use dioxus::prelude::*;

/// A validation rule: returns an error message, or an empty string when the
/// value is acceptable.
pub type ValidationRule = fn(&str) -> String;

// ============================================================================
// Form State
// ============================================================================

/// Field values and validation errors for one controlled form.
///
/// Holds no references to the outside world: no network, no timers, no
/// signals. The [`use_form`] hook wraps it in a `Signal` for components.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    /// Values the form was initialized with (restored by `reset`)
    defaults: HashMap<String, String>,
    /// Current field values
    values: HashMap<String, String>,
    /// Current per-field error messages
    errors: HashMap<String, String>,
}

impl FormState {
    /// Create form state from default field values
    pub fn new(initial: &[(&str, &str)]) -> Self {
        let defaults: HashMap<String, String> = initial
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect();

        Self {
            values: defaults.clone(),
            defaults,
            errors: HashMap::new(),
        }
    }

    /// Current value of a field (empty string for unknown fields)
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Current error message of a field, if any
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// All current values
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// All current errors
    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    /// Whether any field currently has an error
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Record an edit to a single field.
    ///
    /// Sets the field's value and clears that field's error (and only that
    /// field's), so the message disappears as soon as the user starts typing.
    pub fn handle_change(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
        self.errors.remove(field);
    }

    /// Validate the current values against a set of rules.
    ///
    /// Every rule runs against its field's current value; the non-empty
    /// results replace the previous error set wholesale. Returns true iff no
    /// rule produced a message.
    pub fn validate(&mut self, rules: &[(&str, ValidationRule)]) -> bool {
        let mut new_errors = HashMap::new();

        for (field, rule) in rules {
            let message = rule(self.value(field));
            if !message.is_empty() {
                new_errors.insert(field.to_string(), message);
            }
        }

        let is_valid = new_errors.is_empty();
        self.errors = new_errors;
        is_valid
    }

    /// Replace the entire value mapping (used to preload an entity for editing)
    pub fn set_values(&mut self, values: &[(&str, &str)]) {
        self.values = values
            .iter()
            .map(|(field, value)| (field.to_string(), value.to_string()))
            .collect();
    }

    /// Restore the default values and clear all errors
    pub fn reset(&mut self) {
        self.values = self.defaults.clone();
        self.errors.clear();
    }
}

// ============================================================================
// Hook
// ============================================================================

/// Hook providing [`FormState`] in a signal
pub fn use_form(initial: &[(&str, &str)]) -> Signal<FormState> {
    let state = FormState::new(initial);
    use_signal(move || state)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn required_name(value: &str) -> String {
        if value.trim().is_empty() {
            "Name is required".to_string()
        } else {
            String::new()
        }
    }

    fn required_description(value: &str) -> String {
        if value.trim().is_empty() {
            "Description is required".to_string()
        } else {
            String::new()
        }
    }

    fn book_form() -> FormState {
        FormState::new(&[("name", ""), ("description", "")])
    }

    const BOOK_RULES: &[(&str, ValidationRule)] = &[
        ("name", required_name),
        ("description", required_description),
    ];

    #[test]
    fn test_initial_values() {
        let form = FormState::new(&[("name", "Dune"), ("description", "")]);
        assert_eq!(form.value("name"), "Dune");
        assert_eq!(form.value("description"), "");
        assert_eq!(form.value("unknown"), "");
        assert!(!form.has_errors());
    }

    #[test]
    fn test_validate_passes_when_all_rules_return_empty() {
        let mut form = book_form();
        form.handle_change("name", "Dune");
        form.handle_change("description", "Sci-fi novel");

        assert!(form.validate(BOOK_RULES));
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_validate_collects_exactly_the_failing_fields() {
        let mut form = book_form();
        form.handle_change("name", "Dune");

        assert!(!form.validate(BOOK_RULES));
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.error("description"), Some("Description is required"));
        assert_eq!(form.error("name"), None);
    }

    #[test]
    fn test_whitespace_only_value_fails_required_rule() {
        let mut form = book_form();
        form.handle_change("name", "   ");
        form.handle_change("description", "ok");

        assert!(!form.validate(BOOK_RULES));
        assert_eq!(form.error("name"), Some("Name is required"));
    }

    #[test]
    fn test_validate_replaces_prior_errors_instead_of_merging() {
        let mut form = book_form();

        // First pass: both fields fail
        assert!(!form.validate(BOOK_RULES));
        assert_eq!(form.errors().len(), 2);

        // Fix one field directly in the value map, then re-validate
        form.values.insert("name".to_string(), "Dune".to_string());
        assert!(!form.validate(BOOK_RULES));
        assert_eq!(form.errors().len(), 1);
        assert_eq!(form.error("name"), None);
    }

    #[test]
    fn test_handle_change_touches_only_the_named_field() {
        let mut form = book_form();
        form.validate(BOOK_RULES);
        assert_eq!(form.errors().len(), 2);

        form.handle_change("name", "D");

        // Only the edited field's value and error changed
        assert_eq!(form.value("name"), "D");
        assert_eq!(form.value("description"), "");
        assert_eq!(form.error("name"), None);
        assert_eq!(form.error("description"), Some("Description is required"));
    }

    #[test]
    fn test_handle_change_without_prior_error_leaves_errors_alone() {
        let mut form = book_form();
        form.validate(&[("description", required_description)]);
        assert_eq!(form.errors().len(), 1);

        form.handle_change("name", "Dune");
        assert_eq!(form.errors().len(), 1);
    }

    #[test]
    fn test_set_values_replaces_the_entire_mapping() {
        let mut form = book_form();
        form.handle_change("name", "old");

        form.set_values(&[("name", "Dune"), ("description", "Sci-fi novel")]);
        assert_eq!(form.value("name"), "Dune");
        assert_eq!(form.value("description"), "Sci-fi novel");
    }

    #[test]
    fn test_reset_restores_defaults_and_clears_errors() {
        let mut form = FormState::new(&[("name", "default"), ("description", "")]);
        form.handle_change("name", "changed");
        form.handle_change("description", "changed too");
        form.validate(&[("name", |_| "bad".to_string())]);
        assert!(form.has_errors());

        form.reset();
        assert_eq!(form.value("name"), "default");
        assert_eq!(form.value("description"), "");
        assert!(!form.has_errors());
    }
}
