//! Redirect rules for pages that only exist to send the visitor elsewhere.

use crate::access::{Decision, DIVISION_POLICY};
use crate::models::CurrentUser;
use crate::role::RoleTag;
use crate::session::Session;

/// Route paths referenced by guards and redirects.
pub mod paths {
    pub const LANDING: &str = "/";
    pub const LOGIN: &str = "/login";
    pub const UNVERIFIED: &str = "/auth/unverified";
    pub const HOME: &str = "/home";
    pub const DIVISION: &str = "/division";
    pub const DIVISION_DASHBOARD: &str = "/division/dashboard";
    pub const STAFF: &str = "/staff";
    pub const TEACHER_DASHBOARD: &str = "/teacher/dashboard";
}

/// The public landing page.
///
/// Waits for the session check, then sends a signed-in visitor straight to
/// `/home` whatever their role. Anonymous visitors get the login entry point.
pub fn landing_decision(session: &Session) -> Decision {
    match session {
        Session::Unresolved => Decision::Pending,
        Session::Authenticated(_) => Decision::Redirect(paths::HOME),
        Session::Anonymous => Decision::Render,
    }
}

/// The `/division` index has no content of its own. Division admins go on
/// to their dashboard; everybody else goes home.
pub fn division_index_decision(user: Option<&CurrentUser>) -> Decision {
    let Some(user) = user else {
        return Decision::Pending;
    };
    if user.role_tag() == Some(RoleTag::DivisionAdmin) {
        Decision::Redirect(paths::DIVISION_DASHBOARD)
    } else {
        Decision::Redirect(DIVISION_POLICY.fallback)
    }
}

/// Where the session layer sends a visitor it found to be anonymous on a
/// page that requires sign-in.
pub fn sign_in_redirect(session: &Session) -> Option<&'static str> {
    matches!(session, Session::Anonymous).then_some(paths::LOGIN)
}
