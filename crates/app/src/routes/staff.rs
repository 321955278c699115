use dioxus::prelude::*;

/// Staff area for school administrators. Every path under `/staff` lands
/// here behind `StaffGuard`; the trailing segments name the section.
#[component]
pub fn StaffSection(segments: Vec<String>) -> Element {
    let section = segments
        .iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" / ");
    let title = if section.is_empty() {
        "Staff".to_string()
    } else {
        format!("Staff / {section}")
    };

    rsx! {
        div { class: "page staff-section",
            h1 { class: "page-title", "{title}" }
            p { class: "page-subtitle", "Faculty records, sections and school reports." }
        }
    }
}
