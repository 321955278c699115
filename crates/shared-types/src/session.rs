use serde::{Deserialize, Serialize};

use crate::models::CurrentUser;

/// Where the client is in resolving who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    /// The session check has not completed yet.
    #[default]
    Unresolved,
    /// The check completed (or failed) and nobody is signed in.
    Anonymous,
    Authenticated(CurrentUser),
}

impl Session {
    /// Map the result of a session check. `None` means anonymous.
    pub fn from_check(user: Option<CurrentUser>) -> Self {
        match user {
            Some(user) => Session::Authenticated(user),
            None => Session::Anonymous,
        }
    }

    /// The signed-in user, if any.
    ///
    /// Both `Unresolved` and `Anonymous` yield `None`; guards treat that as
    /// "not yet resolved" and wait for the session layer to act.
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            Session::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Session::Unresolved)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    /// Whether writing `next` over `self` is a change subscribers must see.
    ///
    /// Every auth store, reactive or not, asks this before notifying, so a
    /// repeated session check or sign-in of the same user wakes nobody.
    pub fn differs_from(&self, next: &Session) -> bool {
        self != next
    }

    /// Replace `self` with `next` if it differs. Returns whether it did.
    pub fn transition(&mut self, next: Session) -> bool {
        if !self.differs_from(&next) {
            return false;
        }
        *self = next;
        true
    }
}

/// Handle returned by [`AuthStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&Session)>;

/// Process-wide auth state with an explicit read/subscribe contract.
///
/// Passed around by the owner instead of living in a global, so anything
/// that reads it can be handed a store in whatever state a test needs.
/// Listeners run synchronously, in subscription order, after every change
/// of value. Writing a value equal to the current one notifies nobody.
pub struct AuthStore {
    session: Session,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl AuthStore {
    pub fn new() -> Self {
        Self::with_session(Session::Unresolved)
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.session.user()
    }

    /// Record the outcome of a session check.
    pub fn resolve(&mut self, user: Option<CurrentUser>) {
        self.replace(Session::from_check(user));
    }

    pub fn set_user(&mut self, user: CurrentUser) {
        self.replace(Session::Authenticated(user));
    }

    pub fn sign_out(&mut self) {
        self.replace(Session::Anonymous);
    }

    /// Register a listener. It is not called with the current value.
    pub fn subscribe(&mut self, listener: impl FnMut(&Session) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if the id was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        self.listeners.len() != before
    }

    fn replace(&mut self, session: Session) {
        if !self.session.transition(session) {
            return;
        }
        for (_, listener) in self.listeners.iter_mut() {
            listener(&self.session);
        }
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthStore")
            .field("session", &self.session)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
