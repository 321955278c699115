use pretty_assertions::assert_eq;
use shared_types::{
    evaluate, paths, policy_for_path, AccessGuard, AuthStore, Decision, RoleTag, DIVISION_POLICY,
    STAFF_POLICY,
};
use std::cell::RefCell;
use std::rc::Rc;

use crate::common::{user, RecordingNav};

/// A guarded page wired to an auth store the way the app wires it: the
/// guard re-evaluates on every store change, rendering is decided by the
/// latest decision, and every decision change is recorded.
struct MountedPage {
    nav: Rc<RefCell<RecordingNav>>,
    decisions: Rc<RefCell<Vec<Decision>>>,
}

impl MountedPage {
    fn mount(store: &mut AuthStore, path: &str) -> Self {
        let policy = *policy_for_path(path).unwrap();
        let guard = Rc::new(RefCell::new(AccessGuard::new(policy)));
        let nav = Rc::new(RefCell::new(RecordingNav::default()));
        let decisions = Rc::new(RefCell::new(Vec::new()));

        let first = guard
            .borrow_mut()
            .update(store.user(), &mut *nav.borrow_mut());
        decisions.borrow_mut().push(first);

        let (g, n, d) = (guard.clone(), nav.clone(), decisions.clone());
        store.subscribe(move |session| {
            let next = g.borrow_mut().update(session.user(), &mut *n.borrow_mut());
            let mut seen = d.borrow_mut();
            if seen.last() != Some(&next) {
                seen.push(next);
            }
        });

        Self { nav, decisions }
    }

    fn decision(&self) -> Decision {
        *self.decisions.borrow().last().unwrap()
    }

    fn renders_children(&self) -> bool {
        self.decision().may_render()
    }
}

#[test]
fn unresolved_user_is_pending_for_every_allow_set() {
    let mut allow_sets: Vec<Vec<RoleTag>> = vec![vec![]];
    allow_sets.extend(RoleTag::ALL.iter().map(|r| vec![*r]));
    allow_sets.push(RoleTag::ALL.to_vec());
    allow_sets.push(STAFF_POLICY.allow.to_vec());

    for allow in &allow_sets {
        assert_eq!(evaluate(None, allow, paths::HOME), Decision::Pending, "{allow:?}");
    }
}

#[test]
fn division_admin_may_see_division_pages() {
    let u = user("division_admin");
    assert_eq!(evaluate(Some(&u), &[RoleTag::DivisionAdmin], paths::HOME), Decision::Render);
}

#[test]
fn registrar_is_sent_home_from_staff_pages() {
    let u = user("registrar");
    assert_eq!(
        evaluate(
            Some(&u),
            &[RoleTag::Admin, RoleTag::SchoolHead, RoleTag::SuperAdmin],
            paths::HOME,
        ),
        Decision::Redirect("/home")
    );
}

#[test]
fn repeated_evaluation_of_an_unauthorized_user_navigates_once() {
    let mut store = AuthStore::new();
    store.set_user(user("registrar"));
    let page = MountedPage::mount(&mut store, "/staff/faculty");

    // Same value written again: the store stays quiet.
    let same = store.user().cloned().unwrap();
    store.set_user(same);

    // A different registrar: the decision is unchanged.
    store.set_user(user("registrar"));

    assert_eq!(page.nav.borrow().replaced, vec!["/home"]);
    assert!(page.nav.borrow().pushed.is_empty());
    assert!(!page.renders_children());
}

#[test]
fn school_head_sees_staff_pages_but_not_division_pages() {
    let mut store = AuthStore::new();
    store.set_user(user("school_head"));

    let staff = MountedPage::mount(&mut store, "/staff/reports/2024");
    assert_eq!(staff.decision(), Decision::Render);
    assert!(staff.nav.borrow().replaced.is_empty());

    let division = MountedPage::mount(&mut store, "/division/dashboard");
    assert_eq!(division.decision(), Decision::Redirect("/home"));
    assert_eq!(division.nav.borrow().replaced, vec!["/home"]);
    assert!(!division.renders_children());
}

#[test]
fn unresolved_session_waits_then_renders_for_admin() {
    let mut store = AuthStore::new();
    let page = MountedPage::mount(&mut store, "/staff/faculty");

    assert_eq!(page.decision(), Decision::Pending);
    assert!(!page.renders_children());
    assert!(page.nav.borrow().replaced.is_empty());

    store.resolve(Some(user("admin")));

    assert_eq!(*page.decisions.borrow(), vec![Decision::Pending, Decision::Render]);
    assert!(page.renders_children());
    assert!(page.nav.borrow().replaced.is_empty());
    assert!(page.nav.borrow().pushed.is_empty());
}

#[test]
fn signing_out_hides_protected_children_without_a_guard_redirect() {
    let mut store = AuthStore::new();
    store.resolve(Some(user("division_admin")));
    let page = MountedPage::mount(&mut store, "/division/dashboard");
    assert!(page.renders_children());

    store.sign_out();

    assert_eq!(page.decision(), Decision::Pending);
    assert!(!page.renders_children());
    assert!(page.nav.borrow().replaced.is_empty());
}

#[test]
fn role_change_on_a_mounted_page_redirects_once_more() {
    let mut store = AuthStore::new();
    store.resolve(Some(user("teacher")));
    let page = MountedPage::mount(&mut store, "/division/dashboard");

    store.set_user(user("division_admin"));
    store.set_user(user("registrar"));

    assert_eq!(page.nav.borrow().replaced, vec!["/home", "/home"]);
    assert_eq!(
        *page.decisions.borrow(),
        vec![
            Decision::Redirect("/home"),
            Decision::Render,
            Decision::Redirect("/home"),
        ]
    );
}

#[test]
fn every_policy_falls_back_to_home() {
    for policy in [DIVISION_POLICY, STAFF_POLICY] {
        assert_eq!(policy.fallback, paths::HOME, "{}", policy.guard);
    }
}
