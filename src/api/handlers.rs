//! HTTP API handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, SecondsFormat, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorResponse};
use crate::metrics;
use crate::service::types::{GREETING, SERVICE_NAME};
use crate::service::{
    Health, HealthSource, RandomHealth, ServiceState, ServiceStatus, ShutdownOutcome,
    ShutdownRequest,
};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lifecycle state of the service.
    pub service: ServiceState,
    /// Source of the health label in status responses.
    pub health: Arc<dyn HealthSource>,
    /// Prometheus exporter handle, if one is installed.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state with a random health source.
    pub fn new() -> Self {
        Self::with_health(RandomHealth)
    }

    /// Create new app state with a custom health source.
    pub fn with_health(health: impl HealthSource + 'static) -> Self {
        Self {
            service: ServiceState::new(),
            health: Arc::new(health),
            metrics: None,
        }
    }

    /// Attach a Prometheus exporter handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .field("health", &self.health)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a timestamp as ISO-8601 UTC with a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Root greeting response.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Greeting text.
    pub message: &'static str,
}

/// Liveness response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Status probe response.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Current lifecycle status.
    pub status: ServiceStatus,
    /// Server time, ISO-8601 UTC.
    pub timestamp: String,
    /// Illustrative health label.
    pub health: Health,
    /// Service version.
    pub version: &'static str,
    /// Service identifier.
    pub service: &'static str,
}

/// Shutdown response. Timestamp, emergency and reason are omitted when the
/// service was already off.
#[derive(Debug, Serialize, ToSchema)]
pub struct ShutdownResponse {
    /// Human readable result.
    pub message: &'static str,
    /// Status after handling the request.
    pub status: ServiceStatus,
    /// When the service was switched off.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Echo of the emergency flag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency: Option<bool>,
    /// Caller reason or placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<ShutdownOutcome> for ShutdownResponse {
    fn from(outcome: ShutdownOutcome) -> Self {
        match outcome {
            ShutdownOutcome::SwitchedOff {
                status,
                emergency,
                reason,
                at,
            } => Self {
                message: if emergency {
                    "AI has been switched off (emergency)"
                } else {
                    "AI has been switched off"
                },
                status,
                timestamp: Some(format_timestamp(at)),
                emergency: Some(emergency),
                reason: Some(reason),
            },
            ShutdownOutcome::AlreadyOff { status } => Self {
                message: "AI is already off",
                status,
                timestamp: None,
                emergency: None,
                reason: None,
            },
        }
    }
}

/// Root handler - static greeting.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is running", body = MessageResponse)),
    tag = "status"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse { message: GREETING })
}

/// Liveness handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Process is alive", body = HealthResponse)),
    tag = "status"
)]
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Status handler - current lifecycle status and a health label.
#[utoipa::path(
    get,
    path = "/status",
    responses((status = 200, description = "Current service status", body = StatusResponse)),
    tag = "status"
)]
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    let start = Instant::now();
    metrics::record_status_request();

    let response = StatusResponse {
        status: state.service.status().await,
        timestamp: format_timestamp(Utc::now()),
        health: state.health.sample(),
        version: env!("CARGO_PKG_VERSION"),
        service: SERVICE_NAME,
    };

    metrics::record_http_latency("/status", start);
    Json(response)
}

/// Shutdown handler - validates the confirmation token and switches the
/// service off.
#[utoipa::path(
    post,
    path = "/api/shutdown",
    request_body = ShutdownRequest,
    responses(
        (status = 200, description = "Service switched off or already off", body = ShutdownResponse),
        (status = 400, description = "Missing or wrong confirmation token", body = ErrorResponse)
    ),
    tag = "control"
)]
pub async fn shutdown(
    State(state): State<AppState>,
    payload: Result<Json<ShutdownRequest>, JsonRejection>,
) -> Result<Json<ShutdownResponse>, ApiError> {
    let start = Instant::now();
    let result = switch_off(&state, payload).await;
    metrics::record_http_latency("/api/shutdown", start);

    result.map(|outcome| Json(outcome.into()))
}

async fn switch_off(
    state: &AppState,
    payload: Result<Json<ShutdownRequest>, JsonRejection>,
) -> Result<ShutdownOutcome, ApiError> {
    let Json(request) = payload?;

    match state.service.request_shutdown(&request).await {
        Ok(outcome) => {
            metrics::record_shutdown(&outcome);
            Ok(outcome)
        }
        Err(err) => {
            metrics::record_shutdown_rejected();
            Err(err.into())
        }
    }
}

/// Metrics handler - Prometheus text exposition.
pub async fn metrics_text(State(state): State<AppState>) -> impl IntoResponse {
    match &state.metrics {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics exporter not installed".to_string()),
    }
}
