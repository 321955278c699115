use crate::auth::use_auth;
use dioxus::prelude::*;
use shared_types::FeatureFlags;

#[component]
pub fn TeacherDashboard() -> Element {
    let auth = use_auth();
    let flags: FeatureFlags = use_context();

    if !flags.teacher_portal {
        return rsx! {
            div { class: "page",
                h1 { class: "page-title", "Teacher Dashboard" }
                p { class: "page-subtitle", "The teacher portal is not enabled for this deployment." }
            }
        };
    }

    let name = auth
        .user()
        .map(|u| u.first_name().to_string())
        .unwrap_or_default();

    rsx! {
        div { class: "page teacher-dashboard",
            h1 { class: "page-title", "Teacher Dashboard" }
            p { class: "page-subtitle", "Classes and grade sheets for {name}." }
        }
    }
}
