use axum::{
    body::Body,
    extract,
    http::{header, HeaderMap, Request, StatusCode},
    middleware,
    routing::get,
    Router,
};
use pretty_assertions::assert_eq;
use server::auth::cookies::{CookieSlot, PendingCookieAction, PORTAL_ACCESS, PORTAL_REFRESH};
use server::auth::AccessToken;
use server::supabase::SupabaseClients;
use std::time::Duration;
use tower::ServiceExt;

use crate::common::{self, StubBackend};

/// Echoes the access token the middleware resolved, or `-`.
async fn whoami(req: extract::Request) -> String {
    req.extensions()
        .get::<AccessToken>()
        .map(|t| t.0.clone())
        .unwrap_or_else(|| "-".to_string())
}

/// Signs the caller out the way the logout server function does.
async fn sign_out(req: extract::Request) -> StatusCode {
    if let Some(slot) = req.extensions().get::<CookieSlot>() {
        slot.put(PendingCookieAction::Clear);
    }
    StatusCode::NO_CONTENT
}

fn app(clients: SupabaseClients) -> Router {
    Router::new()
        .route("/whoami", get(whoami))
        .route("/sign-out", get(sign_out))
        .layer(middleware::from_fn_with_state(
            clients,
            server::auth::middleware::auth_middleware,
        ))
}

async fn send(app: Router, uri: &str, cookie: Option<&str>) -> (StatusCode, HeaderMap, String) {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let resp = app.oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn access_cookie_is_passed_through_untouched() {
    let backend = StubBackend::start().await;
    let cookie = format!("{PORTAL_ACCESS}=access-abc");

    let (status, headers, body) = send(app(backend.clients()), "/whoami", Some(&cookie)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "access-abc");
    assert!(set_cookies(&headers).is_empty());
}

#[tokio::test]
async fn anonymous_request_passes_without_cookies() {
    let backend = StubBackend::start().await;

    let (status, headers, body) = send(app(backend.clients()), "/whoami", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "-");
    assert!(set_cookies(&headers).is_empty());
}

#[tokio::test]
async fn expired_access_cookie_is_refreshed_transparently() {
    let backend = StubBackend::start().await;
    backend.add_account("head@school.edu", true);
    let refresh = backend.open_refresh("head@school.edu");
    let cookie = format!("{PORTAL_REFRESH}={refresh}");

    let (_, headers, body) = send(app(backend.clients()), "/whoami", Some(&cookie)).await;

    assert!(body.starts_with("access-"));
    assert!(backend.is_session_open(&body));
    let cookies = set_cookies(&headers);
    assert_eq!(cookies.len(), 2);
    assert!(cookies[0].starts_with(&format!("{PORTAL_ACCESS}={body}")));
    assert!(cookies[1].starts_with(&format!("{PORTAL_REFRESH}=refresh-")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
}

#[tokio::test]
async fn failed_refresh_clears_both_cookies() {
    let backend = StubBackend::start().await;
    let cookie = format!("{PORTAL_REFRESH}=refresh-revoked");

    let (_, headers, body) = send(app(backend.clients()), "/whoami", Some(&cookie)).await;

    assert_eq!(body, "-");
    let cookies = set_cookies(&headers);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn refresh_during_outage_keeps_cookies() {
    let backend = StubBackend::start().await;
    backend.add_account("head@school.edu", true);
    let refresh = backend.open_refresh("head@school.edu");
    backend.fail_all();
    let cookie = format!("{PORTAL_REFRESH}={refresh}");

    let (status, headers, body) = send(app(backend.clients()), "/whoami", Some(&cookie)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "-");
    assert!(set_cookies(&headers).is_empty());
}

#[tokio::test]
async fn refresh_timeout_keeps_cookies() {
    let backend = StubBackend::start().await;
    backend.add_account("head@school.edu", true);
    let refresh = backend.open_refresh("head@school.edu");
    backend.stall(Duration::from_secs(2));
    let clients = common::clients_for(&backend.url, Duration::from_millis(200));
    let cookie = format!("{PORTAL_REFRESH}={refresh}");

    let (_, headers, body) = send(app(clients), "/whoami", Some(&cookie)).await;

    assert_eq!(body, "-");
    assert!(!set_cookies(&headers)
        .iter()
        .any(|c| c.starts_with(&format!("{PORTAL_REFRESH}=;"))));
}

#[tokio::test]
async fn handler_scheduled_clear_wins() {
    let backend = StubBackend::start().await;
    let cookie = format!("{PORTAL_ACCESS}=access-abc; {PORTAL_REFRESH}=refresh-abc");

    let (status, headers, _) = send(app(backend.clients()), "/sign-out", Some(&cookie)).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    let cookies = set_cookies(&headers);
    assert!(cookies[0].starts_with(&format!("{PORTAL_ACCESS}=;")));
    assert!(cookies[1].starts_with(&format!("{PORTAL_REFRESH}=;")));
}
