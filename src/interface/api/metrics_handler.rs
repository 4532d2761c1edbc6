//! Prometheus metrics handler

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use metrics::{describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};

/// Install the global Prometheus recorder
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        "yourturn_lookups_total",
        "Registrant lookups by outcome"
    );
    describe_counter!(
        "yourturn_calls_placed_total",
        "Calls accepted by the telephony provider"
    );
    describe_counter!(
        "yourturn_calls_failed_total",
        "Calls the telephony provider refused or could not be reached for"
    );
    describe_counter!(
        "yourturn_status_events_total",
        "Status callback events received, by status"
    );
    describe_counter!(
        "yourturn_calls_answered_total",
        "Phone numbers that moved to answered"
    );
    describe_gauge!(
        "yourturn_push_subscribers",
        "Browsers currently connected for push events"
    );

    Ok(handle)
}

/// Recorder handle that is not installed globally, for tests and embedding
pub fn detached_metrics() -> PrometheusHandle {
    PrometheusBuilder::new().build_recorder().handle()
}

/// HTTP metrics handler
pub async fn metrics_handler(State(prometheus_handle): State<PrometheusHandle>) -> Response {
    (StatusCode::OK, prometheus_handle.render()).into_response()
}

/// Update connected push subscribers gauge
pub fn update_push_subscribers(count: usize) {
    gauge!("yourturn_push_subscribers").set(count as f64);
}
