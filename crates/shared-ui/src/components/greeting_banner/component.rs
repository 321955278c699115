use dioxus::prelude::*;
use shared_types::text::greeting_for_hour;

/// Time-of-day greeting shown at the top of the home page.
///
/// `hour` is the viewer's local hour (0-23). An empty `name` drops the
/// name from the greeting; an empty `role_label` hides the role chip.
#[component]
pub fn GreetingBanner(
    name: String,
    hour: u32,
    #[props(default)] role_label: String,
) -> Element {
    let greeting = greeting_for_hour(hour);
    let title = if name.is_empty() {
        format!("{greeting}!")
    } else {
        format!("{greeting}, {name}!")
    };

    rsx! {
        section { class: "greeting-banner",
            h2 { class: "greeting-banner-title", "{title}" }
            if !role_label.is_empty() {
                span { class: "greeting-banner-role", "{role_label}" }
            }
        }
    }
}
