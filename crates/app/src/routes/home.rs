use crate::auth::{use_auth, use_role_tag};
use crate::guard::route_for_path;
use chrono::Timelike;
use dioxus::prelude::*;
use shared_types::{paths, policy_for_path, FeatureFlags};
use shared_ui::GreetingBanner;

/// Shortcut cards on the home page.
const QUICK_LINKS: &[(&str, &str, &str)] = &[
    (
        "Division dashboard",
        paths::DIVISION_DASHBOARD,
        "Enrollment and staffing across every school in the division.",
    ),
    (
        "School staff",
        paths::STAFF,
        "Faculty records, sections and school reports.",
    ),
    (
        "Teacher dashboard",
        paths::TEACHER_DASHBOARD,
        "Your classes, attendance and grade sheets.",
    ),
];

/// Landing page for every signed-in user.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let flags: FeatureFlags = use_context();
    let role = use_role_tag();
    let user = auth.user();

    let name = user
        .as_ref()
        .map(|u| u.first_name().to_string())
        .unwrap_or_default();
    let role_label = role.map(|r| r.label()).unwrap_or_default().to_string();
    let hour = chrono::Local::now().hour();

    let cards: Vec<(&str, &str, &str)> = QUICK_LINKS
        .iter()
        .copied()
        .filter(|(_, path, _)| *path != paths::TEACHER_DASHBOARD || flags.teacher_portal)
        .filter(|(_, path, _)| policy_for_path(path).map_or(true, |p| p.allows(role)))
        .collect();

    rsx! {
        div { class: "home-page",
            GreetingBanner { name, hour, role_label }

            if role.is_none() {
                p { class: "home-notice",
                    "Your account has no role assigned yet. Ask your school administrator for access."
                }
            }

            div { class: "home-cards",
                for (title, path, blurb) in cards {
                    Link { to: route_for_path(path), class: "home-card",
                        h3 { "{title}" }
                        p { "{blurb}" }
                    }
                }
            }
        }
    }
}
