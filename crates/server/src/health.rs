use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use std::sync::OnceLock;
use std::time::Instant;

use crate::supabase::SupabaseClients;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub backend: String,
    pub uptime_seconds: u64,
    pub version: String,
}

/// `GET /health`. Always answers 200; the backend field says whether the
/// auth service is reachable.
pub async fn health_check(State(clients): State<Option<SupabaseClients>>) -> Json<HealthResponse> {
    let backend = match clients {
        None => "not configured".to_string(),
        Some(clients) => match clients.auth.health().await {
            Ok(()) => "reachable".to_string(),
            Err(e) => format!("error: {e}"),
        },
    };

    let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);

    Json(HealthResponse {
        status: "ok".to_string(),
        backend,
        uptime_seconds: uptime,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub fn health_router(clients: Option<SupabaseClients>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .with_state(clients)
}
