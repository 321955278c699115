use pretty_assertions::assert_eq;
use server::session::{load_current_user, resolve_current_user};
use shared_types::{AppErrorKind, RoleTag, Session};
use std::time::Duration;

use crate::common::{self, StubBackend, DATA_SCHEMA, SERVICE_KEY};

#[tokio::test]
async fn signed_in_user_resolves_with_profile_role() {
    let backend = StubBackend::start().await;
    let id = backend.add_account("head@school.edu", true);
    backend.add_profile(id, "Maria Santos", "school_head");
    let token = backend.open_session("head@school.edu");

    let user = resolve_current_user(&backend.clients(), Some(&token))
        .await
        .expect("session should resolve");

    assert_eq!(user.id, id);
    assert_eq!(user.name, "Maria Santos");
    assert_eq!(user.role_tag(), Some(RoleTag::SchoolHead));
}

#[tokio::test]
async fn profile_is_read_with_service_key_in_data_schema() {
    let backend = StubBackend::start().await;
    let id = backend.add_account("admin@school.edu", true);
    backend.add_profile(id, "Ana Cruz", "admin");
    let token = backend.open_session("admin@school.edu");

    resolve_current_user(&backend.clients(), Some(&token)).await;

    assert_eq!(
        backend.profile_reads(),
        vec![(SERVICE_KEY.to_string(), DATA_SCHEMA.to_string())]
    );
}

#[tokio::test]
async fn super_admin_with_space_is_normalized() {
    let backend = StubBackend::start().await;
    let id = backend.add_account("root@division.gov", true);
    backend.add_profile(id, "Root", "super admin");
    let token = backend.open_session("root@division.gov");

    let user = resolve_current_user(&backend.clients(), Some(&token)).await.unwrap();
    assert_eq!(user.role, "super admin");
    assert_eq!(user.role_tag(), Some(RoleTag::SuperAdmin));
}

#[tokio::test]
async fn missing_or_empty_token_is_anonymous_without_a_backend_call() {
    let backend = StubBackend::start().await;
    backend.fail_all();
    let clients = backend.clients();

    assert_eq!(resolve_current_user(&clients, None).await, None);
    assert_eq!(resolve_current_user(&clients, Some("")).await, None);
    assert!(backend.profile_reads().is_empty());
}

#[tokio::test]
async fn rejected_token_is_anonymous() {
    let backend = StubBackend::start().await;
    let result = resolve_current_user(&backend.clients(), Some("access-expired")).await;
    assert_eq!(result, None);
}

#[tokio::test]
async fn backend_outage_fails_soft_to_anonymous() {
    let backend = StubBackend::start().await;
    backend.add_account("head@school.edu", true);
    let token = backend.open_session("head@school.edu");
    backend.fail_all();

    let result = resolve_current_user(&backend.clients(), Some(&token)).await;

    assert_eq!(result, None);
    assert_eq!(Session::from_check(result), Session::Anonymous);
}

#[tokio::test]
async fn unreachable_backend_fails_soft_to_anonymous() {
    let clients = common::clients_for(&common::unused_url().await, Duration::from_secs(2));
    assert_eq!(resolve_current_user(&clients, Some("access-any")).await, None);
}

#[tokio::test]
async fn hung_backend_times_out_to_anonymous() {
    let backend = StubBackend::start().await;
    backend.add_account("head@school.edu", true);
    let token = backend.open_session("head@school.edu");
    backend.stall(Duration::from_secs(2));

    let clients = common::clients_for(&backend.url, Duration::from_millis(200));
    let result = resolve_current_user(&clients, Some(&token)).await;

    assert_eq!(result, None);
}

#[tokio::test]
async fn account_without_profile_is_signed_in_with_no_role() {
    let backend = StubBackend::start().await;
    let id = backend.add_account("new@school.edu", true);
    let token = backend.open_session("new@school.edu");

    let user = load_current_user(&backend.clients(), &token).await.unwrap();

    assert_eq!(user.id, id);
    assert_eq!(user.name, "new@school.edu");
    assert_eq!(user.role, "");
    assert_eq!(user.role_tag(), None);
}

#[tokio::test]
async fn strict_lookup_reports_the_failure_kind() {
    let backend = StubBackend::start().await;
    let clients = backend.clients();

    let err = load_current_user(&clients, "access-expired").await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::Unauthorized);

    backend.fail_all();
    let err = load_current_user(&clients, "access-expired").await.unwrap_err();
    assert_eq!(err.kind, AppErrorKind::ServiceUnavailable);
}
