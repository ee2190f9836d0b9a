//! HTTP API module: greeting, status probe, shutdown switch and
//! operational endpoints.

pub mod handlers;
pub mod openapi;
pub mod routes;

pub use handlers::AppState;
pub use openapi::ApiDoc;
pub use routes::create_router;
