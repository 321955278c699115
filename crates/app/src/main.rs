use dioxus::prelude::*;
use shared_types::FeatureFlags;
use shared_ui::LoadingPlaceholder;

mod auth;
mod guard;
mod routes;
use auth::AuthState;
use routes::Route;

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    dioxus::serve(|| async move {
        server::config::load_config();
        server::health::record_start_time();
        let flags = server::config::feature_flags();

        let clients = server::config::supabase().cloned();
        if clients.is_none() {
            tracing::warn!("Backend not configured; every visitor is treated as anonymous");
        }

        let mut router = dioxus::server::router(App).merge(server::health::health_router(clients.clone()));

        if let Some(clients) = clients {
            router = router.layer(axum::middleware::from_fn_with_state(
                clients,
                server::auth::middleware::auth_middleware,
            ));
        }

        Ok(server::telemetry::with_http_layers(router, flags))
    });

    #[cfg(not(feature = "server"))]
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    // Fetch feature flags once and provide via context (defaults all-off on error)
    let flags_resource =
        use_server_future(move || async move { server::api::get_feature_flags().await })?;

    let flags = flags_resource
        .read()
        .as_ref()
        .cloned()
        .unwrap_or(Ok(FeatureFlags::default()))
        .unwrap_or_default();

    use_context_provider(|| flags);
    use_context_provider(AuthState::new);

    rsx! {
        document::Link { rel: "stylesheet", href: shared_ui::STYLESHEET }
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        SuspenseBoundary {
            fallback: |_| rsx! { LoadingPlaceholder {} },
            Router::<Route> {}
        }
    }
}
