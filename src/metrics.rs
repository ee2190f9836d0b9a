//! Prometheus metrics for request counting and latency tracking.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::service::ShutdownOutcome;

// === Metric Name Constants ===

/// Status probe counter metric name.
pub const METRIC_STATUS_REQUESTS: &str = "status_requests_total";
/// Shutdown request counter metric name, labelled by outcome.
pub const METRIC_SHUTDOWN_REQUESTS: &str = "shutdown_requests_total";
/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";

/// Install the global Prometheus recorder and describe all metrics.
/// Call this once at startup.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(
        METRIC_STATUS_REQUESTS,
        "Total number of status probe requests"
    );
    describe_counter!(
        METRIC_SHUTDOWN_REQUESTS,
        "Total number of shutdown requests by outcome"
    );
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Record a status probe.
pub fn record_status_request() {
    counter!(METRIC_STATUS_REQUESTS).increment(1);
}

/// Record a handled shutdown request.
pub fn record_shutdown(outcome: &ShutdownOutcome) {
    let label = match outcome {
        ShutdownOutcome::SwitchedOff { .. } => "performed",
        ShutdownOutcome::AlreadyOff { .. } => "already_off",
    };
    counter!(METRIC_SHUTDOWN_REQUESTS, "outcome" => label).increment(1);
}

/// Record a shutdown request rejected by validation.
pub fn record_shutdown_rejected() {
    counter!(METRIC_SHUTDOWN_REQUESTS, "outcome" => "rejected").increment(1);
}

/// Record HTTP request latency for a route.
pub fn record_http_latency(route: &'static str, start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "route" => route).record(latency_ms);
}
