pub mod division;
pub mod home;
pub mod landing;
pub mod login;
pub mod not_found;
pub mod staff;
pub mod teacher;
pub mod unverified;

use crate::auth::{use_auth, use_role_tag};
use crate::guard::{route_for_path, DivisionGuard, StaffGuard};
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::LdLogOut;
use dioxus_free_icons::Icon;
use shared_types::{paths, policy_for_path, sign_in_redirect, FeatureFlags};
use shared_ui::{LoadingPlaceholder, NavProgress};

use division::{DivisionDashboard, DivisionIndex};
use home::Home;
use landing::Landing;
use login::Login;
use not_found::NotFound;
use staff::StaffSection;
use teacher::TeacherDashboard;
use unverified::Unverified;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[layout(SessionLoader)]
    #[route("/")]
    Landing {},
    #[route("/login")]
    Login {},
    #[route("/auth/unverified")]
    Unverified {},
    #[layout(RequireSession)]
    #[layout(PortalLayout)]
    #[route("/home")]
    Home {},
    #[route("/division")]
    DivisionIndex {},
    #[layout(DivisionGuard)]
    #[route("/division/dashboard")]
    DivisionDashboard {},
    #[end_layout]
    #[layout(StaffGuard)]
    #[route("/staff/:..segments")]
    StaffSection { segments: Vec<String> },
    #[end_layout]
    #[route("/teacher/dashboard")]
    TeacherDashboard {},
    #[end_layout]
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Runs the session check once per page load and resolves `AuthState`.
///
/// A failed check is logged and resolves to anonymous, never to an error
/// page. The top progress bar shows until the check settles.
#[component]
fn SessionLoader() -> Element {
    let mut auth = use_auth();
    let flags: FeatureFlags = use_context();

    let check = use_server_future(move || async move { server::api::get_current_user().await })?;

    use_effect(move || {
        let outcome = check.read().as_ref().cloned();
        match outcome {
            Some(Ok(user)) => auth.resolve(user),
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Session check failed, continuing as anonymous");
                auth.resolve(None);
            }
            None => {}
        }
    });

    let unresolved = !auth.session.read().is_resolved();

    rsx! {
        NavProgress { active: flags.nav_progress && unresolved }
        Outlet::<Route> {}
    }
}

/// Layout for pages that need a signed-in user. Sends anonymous visitors
/// to the login page; shows a placeholder until the session resolves.
#[component]
fn RequireSession() -> Element {
    let auth = use_auth();
    let nav = navigator();

    use_effect(move || {
        if let Some(path) = sign_in_redirect(&auth.session.read()) {
            nav.replace(route_for_path(path));
        }
    });

    if auth.is_authenticated() {
        rsx! { Outlet::<Route> {} }
    } else {
        rsx! { LoadingPlaceholder {} }
    }
}

/// Navigation entries, shown only to roles their route policy admits.
const NAV_LINKS: &[(&str, &str)] = &[
    ("Home", paths::HOME),
    ("Division", paths::DIVISION_DASHBOARD),
    ("Staff", paths::STAFF),
    ("Teacher", paths::TEACHER_DASHBOARD),
];

/// Header with role-filtered navigation and the sign-out button.
#[component]
fn PortalLayout() -> Element {
    let mut auth = use_auth();
    let flags: FeatureFlags = use_context();
    let role = use_role_tag();
    let route: Route = use_route();
    let current_path = route.to_string();
    let name = auth.user().map(|u| u.name).unwrap_or_default();

    let links: Vec<(&str, &str)> = NAV_LINKS
        .iter()
        .copied()
        .filter(|(_, path)| *path != paths::TEACHER_DASHBOARD || flags.teacher_portal)
        .filter(|(_, path)| policy_for_path(path).map_or(true, |p| p.allows(role)))
        .collect();

    let handle_logout = move |_: MouseEvent| async move {
        if let Err(e) = server::api::logout().await {
            tracing::warn!(error = %e, "Sign-out request failed");
        }
        auth.sign_out();
        navigator().replace(Route::Login {});
    };

    rsx! {
        div { class: "portal",
            header { class: "portal-header",
                span { class: "portal-brand", "School Portal" }
                nav { class: "portal-nav",
                    for (label, path) in links {
                        Link {
                            to: route_for_path(path),
                            class: if current_path.starts_with(path) { "portal-nav-link active" } else { "portal-nav-link" },
                            "{label}"
                        }
                    }
                }
                div { class: "portal-user",
                    span { class: "portal-user-name", "{name}" }
                    button { class: "portal-logout", onclick: handle_logout,
                        Icon::<LdLogOut> { icon: LdLogOut, width: 16, height: 16 }
                        "Sign out"
                    }
                }
            }
            main { class: "portal-main",
                Outlet::<Route> {}
            }
        }
    }
}
