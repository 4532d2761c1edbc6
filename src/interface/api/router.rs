//! API Router configuration

use super::call_handler::submit_call;
use super::metrics_handler::metrics_handler;
use super::pages::{index_page, thank_you_page};
use super::state::AppState;
use super::status_handler::{call_check, call_status, health_check};
use super::ws_handler::ws_handler;
use axum::{
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the HTTP router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    let event_broadcaster = state.event_broadcaster.clone();

    // Browser-facing pages and the call flow
    let page_routes = Router::new()
        .route("/", get(index_page))
        .route("/call", post(submit_call))
        .route("/thankyou", get(thank_you_page));

    // Provider webhook and polling
    let status_routes = Router::new()
        .route("/call-status", post(call_status))
        .route("/call-check", get(call_check))
        .route("/health", get(health_check));

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    // WebSocket route (separate state)
    let ws_routes = Router::new()
        .route("/ws", get(ws_handler))
        .with_state(event_broadcaster);

    Router::new()
        .merge(page_routes)
        .merge(status_routes)
        .with_state(state)
        .merge(metrics_routes)
        .merge(ws_routes)
        .layer(CatchPanicLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
