//! Role-based route access.
//!
//! A [`RouteAccessPolicy`] names the roles allowed on a group of routes and
//! where everybody else is sent. [`evaluate`] turns the current user into a
//! [`Decision`]; [`AccessGuard`] adds the one-shot redirect on top.
//!
//! These guards shape navigation only. The server still checks the session
//! on every data request.

use crate::models::CurrentUser;
use crate::redirect::paths;
use crate::role::RoleTag;

/// What a guarded page should do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The session is not resolved yet: render nothing, navigate nowhere.
    Pending,
    /// The user may not see this page: render nothing, replace the history
    /// entry with this path.
    Redirect(&'static str),
    Render,
}

impl Decision {
    pub fn may_render(&self) -> bool {
        matches!(self, Decision::Render)
    }
}

/// Allowed roles and fallback route for a group of guarded pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteAccessPolicy {
    pub guard: &'static str,
    pub allow: &'static [RoleTag],
    pub fallback: &'static str,
}

pub const DIVISION_POLICY: RouteAccessPolicy = RouteAccessPolicy {
    guard: "DivisionGuard",
    allow: &[RoleTag::DivisionAdmin],
    fallback: paths::HOME,
};

pub const STAFF_POLICY: RouteAccessPolicy = RouteAccessPolicy {
    guard: "StaffGuard",
    allow: &[RoleTag::Admin, RoleTag::SchoolHead, RoleTag::SuperAdmin],
    fallback: paths::HOME,
};

/// Route prefix → policy. First match wins.
pub const POLICIES: &[(&str, RouteAccessPolicy)] = &[
    (paths::DIVISION, DIVISION_POLICY),
    (paths::STAFF, STAFF_POLICY),
];

/// Find the policy guarding `path`, matching whole path segments so that
/// `/staffroom` is not mistaken for `/staff`.
pub fn policy_for_path(path: &str) -> Option<&'static RouteAccessPolicy> {
    POLICIES.iter().find_map(|(prefix, policy)| {
        let rest = path.strip_prefix(prefix)?;
        (rest.is_empty() || rest.starts_with('/') || rest.starts_with('?')).then_some(policy)
    })
}

impl RouteAccessPolicy {
    pub fn allows(&self, role: Option<RoleTag>) -> bool {
        role.is_some_and(|r| self.allow.contains(&r))
    }

    pub fn evaluate(&self, user: Option<&CurrentUser>) -> Decision {
        evaluate(user, self.allow, self.fallback)
    }
}

/// Decide whether `user` may see a page open to `allow`.
///
/// `None` is an unresolved session and always yields `Pending`, never a
/// redirect. A role outside `allow`, including a role string this portal
/// does not recognise, yields `Redirect(fallback)`.
pub fn evaluate(
    user: Option<&CurrentUser>,
    allow: &[RoleTag],
    fallback: &'static str,
) -> Decision {
    let Some(user) = user else {
        return Decision::Pending;
    };
    match user.role_tag() {
        Some(role) if allow.contains(&role) => Decision::Render,
        _ => Decision::Redirect(fallback),
    }
}

/// Client-side navigation primitives.
pub trait Navigate {
    /// Navigate, replacing the current history entry.
    fn replace(&mut self, path: &str);
    /// Navigate, appending a history entry.
    fn push(&mut self, path: &str);
}

/// Lets a redirect fire once per transition into [`Decision::Redirect`].
///
/// The fence remembers the `(role, fallback)` pair it last fired for. The
/// same pair does not fire again until a non-redirect decision re-arms it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectFence {
    fired_for: Option<(String, &'static str)>,
}

impl RedirectFence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path to navigate to, or `None` if nothing should happen.
    pub fn observe(&mut self, user: Option<&CurrentUser>, decision: Decision) -> Option<&'static str> {
        let Decision::Redirect(path) = decision else {
            self.fired_for = None;
            return None;
        };
        let key = (user.map(|u| u.role.clone()).unwrap_or_default(), path);
        if self.fired_for.as_ref() == Some(&key) {
            return None;
        }
        self.fired_for = Some(key);
        Some(path)
    }
}

/// A policy plus the fence that keeps its redirect one-shot.
///
/// Holds the decision of the last [`AccessGuard::update`], so rendering and
/// navigation follow the same single evaluation. Starts out `Pending`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGuard {
    policy: RouteAccessPolicy,
    fence: RedirectFence,
    decision: Decision,
}

impl AccessGuard {
    pub fn new(policy: RouteAccessPolicy) -> Self {
        Self {
            policy,
            fence: RedirectFence::new(),
            decision: Decision::Pending,
        }
    }

    pub fn policy(&self) -> &RouteAccessPolicy {
        &self.policy
    }

    /// Decision from the most recent update.
    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Re-evaluate after the user changed and perform the redirect, if one
    /// is due, with `replace` so the refused route stays out of history.
    pub fn update(&mut self, user: Option<&CurrentUser>, nav: &mut impl Navigate) -> Decision {
        let decision = self.policy.evaluate(user);
        if let Some(path) = self.fence.observe(user, decision) {
            nav.replace(path);
        }
        self.decision = decision;
        decision
    }
}
