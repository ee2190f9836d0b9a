//! HTTP API route definitions.

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;

use super::handlers::{health, metrics_text, root, shutdown, status, AppState};
use super::openapi::ApiDoc;

/// CORS policy admitting a single origin with credentials. Methods and
/// headers are mirrored from the preflight so every one is permitted.
pub fn cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list([allowed_origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Create the API router.
pub fn create_router(state: AppState, allowed_origin: HeaderValue) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/status", get(status))
        .route("/api/shutdown", post(shutdown))
        // Operational endpoints
        .route("/health", get(health))
        .route("/metrics", get(metrics_text))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .layer(cors_layer(allowed_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
