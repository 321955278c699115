use dioxus::prelude::*;
use dioxus::router::Navigator;
use shared_types::access::AccessGuard as GuardState;
use shared_types::{Decision, Navigate, RedirectFence, RouteAccessPolicy, DIVISION_POLICY, STAFF_POLICY};

use crate::auth::use_auth;
use crate::routes::Route;

/// Resolve a path to a route, falling back to the 404 page.
pub fn route_for_path(path: &str) -> Route {
    path.parse::<Route>().unwrap_or_else(|_| Route::NotFound {
        route: path
            .trim_start_matches('/')
            .split('/')
            .map(str::to_string)
            .collect(),
    })
}

/// The router's navigator behind the platform-neutral `Navigate` trait.
#[derive(Clone, Copy)]
pub struct RouterNavigator(pub Navigator);

impl Navigate for RouterNavigator {
    fn replace(&mut self, path: &str) {
        self.0.replace(route_for_path(path));
    }

    fn push(&mut self, path: &str) {
        self.0.push(route_for_path(path));
    }
}

/// Follow `decision` into a history-replacing redirect, at most once per
/// transition into [`Decision::Redirect`].
pub fn use_one_shot_redirect(decision: Memo<Decision>) {
    let auth = use_auth();
    let mut nav = RouterNavigator(navigator());
    let mut fence = use_signal(RedirectFence::new);

    use_effect(move || {
        let current = decision();
        let session = auth.session.read();
        if let Some(path) = fence.write().observe(session.user(), current) {
            tracing::debug!(path, "Redirecting");
            nav.replace(path);
        }
    });
}

/// Render `children` only for users `policy` allows.
///
/// Renders nothing while the session is unresolved and nothing while a
/// refused user is being sent to the policy's fallback route. Until the
/// first update runs (and during server rendering) the guard is `Pending`.
#[component]
pub fn AccessGuard(policy: RouteAccessPolicy, children: Element) -> Element {
    let auth = use_auth();
    let mut nav = RouterNavigator(navigator());
    let mut state = use_signal(move || GuardState::new(policy));

    // The one evaluation per session change; rendering reads its result.
    use_effect(move || {
        let session = auth.session.read();
        let outcome = state.write().update(session.user(), &mut nav);
        if let Decision::Redirect(path) = outcome {
            tracing::debug!(guard = policy.guard, path, "Role not allowed");
        }
    });

    if state.read().decision().may_render() {
        rsx! { {children} }
    } else {
        rsx! {}
    }
}

/// Layout for pages reserved to division admins.
#[component]
pub fn DivisionGuard() -> Element {
    rsx! {
        AccessGuard { policy: DIVISION_POLICY,
            Outlet::<Route> {}
        }
    }
}

/// Layout for school staff pages.
#[component]
pub fn StaffGuard() -> Element {
    rsx! {
        AccessGuard { policy: STAFF_POLICY,
            Outlet::<Route> {}
        }
    }
}
