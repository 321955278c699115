use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use pretty_assertions::assert_eq;
use serde_json::Value;
use server::health::health_router;
use tower::ServiceExt;

use crate::common::StubBackend;

async fn health(backend: &StubBackend) -> (StatusCode, Value) {
    let resp = health_router(Some(backend.clients()))
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn reachable_backend_is_reported() {
    let backend = StubBackend::start().await;

    let (status, body) = health(&backend).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "reachable");
}

#[tokio::test]
async fn backend_outage_still_answers_ok() {
    let backend = StubBackend::start().await;
    backend.fail_all();

    let (status, body) = health(&backend).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["backend"].as_str().unwrap().starts_with("error:"));
}
