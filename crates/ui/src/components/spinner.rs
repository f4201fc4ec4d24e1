//! Indeterminate loading spinner.

use dioxus::prelude::*;

/// Small inline spinner
#[component]
pub fn Spinner() -> Element {
    rsx! {
        span { class: "spinner", aria_label: "Loading" }
    }
}

/// Spinner centered in the available space, used for whole-page loading
#[component]
pub fn CenteredSpinner() -> Element {
    rsx! {
        div {
            class: "spinner-center",
            Spinner {}
        }
    }
}
