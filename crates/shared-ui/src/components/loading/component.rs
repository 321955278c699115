use dioxus::prelude::*;

/// Centered placeholder shown while the session check is unresolved.
#[component]
pub fn LoadingPlaceholder(#[props(default = String::from("Loading..."))] message: String) -> Element {
    rsx! {
        div { class: "loading-placeholder",
            div { class: "loading-placeholder-pulse" }
            p { "{message}" }
        }
    }
}
