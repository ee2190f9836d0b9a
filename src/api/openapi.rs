//! OpenAPI document for the HTTP surface.

use utoipa::OpenApi;

use super::handlers;

/// Generated OpenAPI description, served at `/openapi.json`.
#[derive(OpenApi)]
#[openapi(
    info(title = "Switch Off AI API", version = "0.1.0"),
    paths(handlers::root, handlers::status, handlers::shutdown, handlers::health),
    tags(
        (name = "status", description = "Greeting, liveness and status probe"),
        (name = "control", description = "Simulated shutdown switch")
    )
)]
pub struct ApiDoc;
