use dioxus::prelude::*;
use shared_types::{CurrentUser, RoleTag, Session};

/// Global authentication state.
///
/// Provided once at the app root and read through [`use_auth`]; reading
/// `session` inside a component, memo or effect subscribes it to changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub session: Signal<Session>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            session: Signal::new(Session::Unresolved),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn user(&self) -> Option<CurrentUser> {
        self.session.read().user().cloned()
    }

    /// Record the outcome of the session check.
    pub fn resolve(&mut self, user: Option<CurrentUser>) {
        self.replace(Session::from_check(user));
    }

    pub fn set_user(&mut self, user: CurrentUser) {
        self.replace(Session::Authenticated(user));
    }

    pub fn sign_out(&mut self) {
        self.replace(Session::Anonymous);
    }

    // Same change rule as `AuthStore`: equal writes wake nobody.
    fn replace(&mut self, session: Session) {
        if self.session.peek().differs_from(&session) {
            self.session.set(session);
        }
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Normalized role of the signed-in user, if any.
pub fn use_role_tag() -> Option<RoleTag> {
    let auth = use_auth();
    let session = auth.session.read();
    session.user().and_then(|u| u.role_tag())
}
