use axum::Router;
use shared_types::FeatureFlags;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Wrap the router with request-id propagation and, when enabled, one
/// tracing span per HTTP request.
///
/// Dioxus owns the tracing subscriber; this only adds the spans.
pub fn with_http_layers(router: Router, flags: &FeatureFlags) -> Router {
    let router = if flags.request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
