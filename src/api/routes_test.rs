//! Integration tests for the router surface: auth, CORS, fallback, events.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use crate::api::{routes, state::AppState};
use crate::events::{EventBroadcaster, EventKind};
use crate::graph::testing::MockGraph;

fn test_app() -> (axum::Router, EventBroadcaster) {
    let broadcaster = EventBroadcaster::new();
    let state = AppState::new(MockGraph::new(), broadcaster.clone());
    (routes::create_router(state), broadcaster)
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_authorization_is_401_with_exact_body() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/planner/tasks")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(
        String::from_utf8(body.to_vec()).unwrap(),
        r#"{"error":"Unauthorized - No access token provided"}"#
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn malformed_authorization_is_401() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/planner/tasks")
                .header("authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn events_requires_a_bearer_too() {
    let (app, _) = test_app();

    let response = app
        .oneshot(Request::builder().uri("/events").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_path_is_json_404() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/unknown/thing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let parsed: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(parsed, json!({"error": "Not found"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn preflight_returns_200_with_permissive_cors() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/planner/tasks")
                .header("origin", "http://localhost:5173")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert!(body.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn responses_carry_cors_headers() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/planner/tasks")
                .header("origin", "http://localhost:5173")
                .header("authorization", "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn events_stream_starts_with_connected_frame() {
    let (app, _) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/events")
                .header("authorization", "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("text/event-stream")
    );

    // The connected frame is queued at subscribe time, so the first body
    // frame is available without any broadcast.
    let mut body = response.into_body();
    let frame = body.frame().await.unwrap().unwrap();
    let chunk = frame.into_data().unwrap();
    let text = String::from_utf8(chunk.to_vec()).unwrap();
    assert!(text.starts_with("event: connected\n"));
    assert!(text.contains("subscriberId"));
    assert!(text.ends_with("\n\n"));
}

#[tokio::test(flavor = "multi_thread")]
async fn broadcasts_reach_an_open_stream() {
    let (app, broadcaster) = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/events")
                .header("authorization", "Bearer test-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let mut body = response.into_body();
    // Drain the connected frame first.
    let _ = body.frame().await.unwrap().unwrap();

    broadcaster.broadcast(EventKind::TaskCreated, json!({"id": "t1"}));

    let frame = body.frame().await.unwrap().unwrap();
    let text = String::from_utf8(frame.into_data().unwrap().to_vec()).unwrap();
    assert!(text.starts_with("event: task_created\n"));

    let data_line = text
        .lines()
        .find(|l| l.starts_with("data: "))
        .expect("frame has a data line");
    let data: serde_json::Value =
        serde_json::from_str(data_line.trim_start_matches("data: ")).unwrap();
    assert_eq!(data["id"], "t1");
    assert!(data["timestamp"].is_string());
}
