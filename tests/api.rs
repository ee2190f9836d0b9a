//! End-to-end tests of the HTTP surface through the full router.

use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::Router;
use chrono::DateTime;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use switch_off_ai::api::{create_router, AppState};
use switch_off_ai::config::DEFAULT_ALLOWED_ORIGIN;
use switch_off_ai::service::{FixedHealth, Health};

fn app(state: &AppState) -> Router {
    create_router(
        state.clone(),
        HeaderValue::from_static(DEFAULT_ALLOWED_ORIGIN),
    )
}

async fn send(state: &AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = app(state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn get(state: &AppState, uri: &str) -> (StatusCode, Value) {
    send(
        state,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post_shutdown(state: &AppState, body: Value) -> (StatusCode, Value) {
    send(
        state,
        Request::builder()
            .method(Method::POST)
            .uri("/api/shutdown")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn current_status(state: &AppState) -> Value {
    get(state, "/status").await.1["status"].clone()
}

#[tokio::test]
async fn root_returns_greeting_regardless_of_state() {
    let state = AppState::new();
    let expected = json!({"message": "Switch Off AI backend is running"});

    assert_eq!(get(&state, "/").await, (StatusCode::OK, expected.clone()));

    post_shutdown(&state, json!({"confirmation": "CONFIRM"})).await;
    assert_eq!(get(&state, "/").await, (StatusCode::OK, expected));
}

#[tokio::test]
async fn status_reports_initial_state() {
    let state = AppState::with_health(FixedHealth(Health::Warning));
    let (code, body) = get(&state, "/status").await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "active");
    assert_eq!(body["health"], "warning");
    assert_eq!(body["version"], "0.1.0");
    assert_eq!(body["service"], "switch-off-ai");
}

#[tokio::test]
async fn status_health_and_timestamp_are_well_formed() {
    let state = AppState::new();
    for _ in 0..20 {
        let (_, body) = get(&state, "/status").await;

        let health = body["health"].as_str().unwrap();
        assert!(["healthy", "degraded", "warning"].contains(&health));

        let timestamp = body["timestamp"].as_str().unwrap();
        assert!(timestamp.ends_with('Z'), "{timestamp}");
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }
}

#[tokio::test]
async fn wrong_confirmation_is_rejected_without_state_change() {
    let state = AppState::new();
    assert_eq!(current_status(&state).await, "active");

    let (code, body) = post_shutdown(&state, json!({"confirmation": "wrong"})).await;

    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"detail": "Shutdown requires confirmation='CONFIRM'"})
    );
    assert_eq!(current_status(&state).await, "active");
}

#[tokio::test]
async fn confirmed_shutdown_then_already_off() {
    let state = AppState::new();

    let (code, body) = post_shutdown(&state, json!({"confirmation": "CONFIRM"})).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "shutdown");
    assert_eq!(body["emergency"], false);
    assert_eq!(body["reason"], "No reason provided");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    assert_eq!(current_status(&state).await, "shutdown");

    let (code, body) = post_shutdown(&state, json!({"confirmation": "CONFIRM"})).await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(
        body,
        json!({"message": "AI is already off", "status": "shutdown"})
    );
    assert_eq!(current_status(&state).await, "shutdown");
}

#[tokio::test]
async fn emergency_shutdown_goes_offline() {
    let state = AppState::new();

    let (code, body) = post_shutdown(
        &state,
        json!({"confirmation": "CONFIRM", "emergency": true, "reason": "test"}),
    )
    .await;

    assert_eq!(code, StatusCode::OK);
    assert_eq!(body["status"], "emergency_offline");
    assert_eq!(body["emergency"], true);
    assert_eq!(body["reason"], "test");
    assert_eq!(current_status(&state).await, "emergency_offline");

    let (_, body) = post_shutdown(&state, json!({"confirmation": "CONFIRM"})).await;
    assert_eq!(body["message"], "AI is already off");
    assert_eq!(body["status"], "emergency_offline");
}

#[tokio::test]
async fn empty_reason_uses_placeholder() {
    let state = AppState::new();
    let (_, body) = post_shutdown(&state, json!({"confirmation": "CONFIRM", "reason": ""})).await;
    assert_eq!(body["reason"], "No reason provided");
}

#[tokio::test]
async fn missing_confirmation_is_a_client_error() {
    let state = AppState::new();
    let (code, body) = post_shutdown(&state, json!({"emergency": true})).await;

    assert!(code.is_client_error(), "{code}");
    assert!(body["detail"].is_string());
    assert_eq!(current_status(&state).await, "active");
}

#[tokio::test]
async fn non_json_body_is_a_client_error() {
    let state = AppState::new();
    let (code, _) = send(
        &state,
        Request::builder()
            .method(Method::POST)
            .uri("/api/shutdown")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(code, StatusCode::BAD_REQUEST);
    assert_eq!(current_status(&state).await, "active");
}

#[tokio::test]
async fn health_and_openapi_are_served() {
    let state = AppState::new();

    assert_eq!(
        get(&state, "/health").await,
        (StatusCode::OK, json!({"status": "ok"}))
    );

    let (code, doc) = get(&state, "/openapi.json").await;
    assert_eq!(code, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Switch Off AI API");
    assert!(doc["paths"]["/api/shutdown"]["post"].is_object());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_http_shutdowns_switch_off_once() {
    let state = AppState::new();

    let handles: Vec<_> = (0..16)
        .map(|_| {
            let state = state.clone();
            tokio::spawn(async move {
                post_shutdown(&state, json!({"confirmation": "CONFIRM"})).await
            })
        })
        .collect();

    let mut already_off = 0;
    for handle in handles {
        let (code, body) = handle.await.unwrap();
        assert_eq!(code, StatusCode::OK);
        if body["message"] == "AI is already off" {
            already_off += 1;
        }
    }

    assert_eq!(already_off, 15);
}
