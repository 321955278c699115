use dioxus::prelude::*;

/// Thin indeterminate bar pinned to the top of the viewport while a
/// navigation or session check is in flight. Renders nothing when idle.
#[component]
pub fn NavProgress(
    active: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    if !active {
        return rsx! {};
    }

    let base = vec![Attribute::new("class", "nav-progress", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        div {
            role: "progressbar",
            "aria-busy": "true",
            "aria-label": "Loading",
            ..merged,
            div { class: "nav-progress-indicator" }
        }
    }
}
