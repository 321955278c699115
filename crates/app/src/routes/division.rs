use crate::auth::{use_auth, use_role_tag};
use crate::guard::use_one_shot_redirect;
use dioxus::prelude::*;
use shared_types::division_index_decision;
use shared_ui::LoadingPlaceholder;

/// `/division` has no page of its own: division admins continue to the
/// dashboard and everyone else goes home.
#[component]
pub fn DivisionIndex() -> Element {
    let auth = use_auth();
    let decision = use_memo(move || division_index_decision(auth.session.read().user()));
    use_one_shot_redirect(decision);

    rsx! { LoadingPlaceholder { message: "Redirecting...".to_string() } }
}

/// Division-wide overview. Only reachable through `DivisionGuard`.
#[component]
pub fn DivisionDashboard() -> Element {
    let auth = use_auth();
    let role = use_role_tag();
    let name = auth.user().map(|u| u.name).unwrap_or_default();
    let role_label = role.map(|r| r.label()).unwrap_or_default();

    rsx! {
        div { class: "page division-dashboard",
            h1 { class: "page-title", "Division Dashboard" }
            p { class: "page-subtitle", "Signed in as {name} ({role_label})" }
            div { class: "page-panels",
                section { class: "page-panel",
                    h3 { "Schools" }
                    p { "Enrollment and staffing summaries for each school." }
                }
                section { class: "page-panel",
                    h3 { "Reports" }
                    p { "Division-level submissions awaiting review." }
                }
            }
        }
    }
}
