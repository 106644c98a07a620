//! Integration tests for the Planner proxy endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{routes, state::AppState};
use crate::events::EventBroadcaster;
use crate::graph::PlannerTask;
use crate::graph::testing::MockGraph;

fn task(id: &str, title: &str, percent_complete: i32) -> PlannerTask {
    PlannerTask {
        id: id.to_string(),
        plan_id: "plan-1".to_string(),
        bucket_id: "bucket-1".to_string(),
        title: title.to_string(),
        percent_complete,
        ..Default::default()
    }
}

fn test_app(mock: MockGraph) -> (axum::Router, EventBroadcaster) {
    let broadcaster = EventBroadcaster::new();
    let state = AppState::new(mock, broadcaster.clone());
    (routes::create_router(state), broadcaster)
}

fn seeded_app() -> (axum::Router, EventBroadcaster) {
    test_app(MockGraph::with_tasks(vec![
        task("t1", "Draft report", 0),
        task("t2", "Review report", 40),
        task("t3", "File report", 100),
        task("t4", "Archive report", 100),
    ]))
}

fn authed(request: axum::http::request::Builder) -> axum::http::request::Builder {
    request.header("authorization", "Bearer test-token")
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_returns_all_without_filter() {
    let (app, _) = seeded_app();

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/planner/tasks"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["total"], 4);
    assert_eq!(body["items"].as_array().unwrap().len(), 4);
}

#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_completed_filter_keeps_only_full_percent() {
    let (app, _) = seeded_app();

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/planner/tasks?status=completed"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|t| t["percentComplete"] == 100));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_in_progress_filter() {
    let (app, _) = seeded_app();

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/planner/tasks?status=inProgress"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = json_body(response).await;
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "t2");
}

#[tokio::test(flavor = "multi_thread")]
async fn list_tasks_rejects_unknown_status() {
    let (app, _) = seeded_app();

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/planner/tasks?status=finished"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Invalid status filter");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_task_by_id() {
    let (app, _) = seeded_app();

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/planner/tasks/t2"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["id"], "t2");
    assert_eq!(body["title"], "Review report");
}

#[tokio::test(flavor = "multi_thread")]
async fn get_unknown_task_is_404() {
    let (app, _) = seeded_app();

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/planner/tasks/nope"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Not found");
    assert!(body["details"].as_str().unwrap().contains("nope"));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_with_empty_body_lists_required_fields() {
    let (app, _) = test_app(MockGraph::new());

    let response = app
        .oneshot(
            authed(
                Request::builder()
                    .method("POST")
                    .uri("/api/planner/tasks")
                    .header("content-type", "application/json"),
            )
            .body(Body::from("{}"))
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains(r#""required":["title","planId","bucketId"]"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_lists_only_the_absent_fields() {
    let (app, _) = test_app(MockGraph::new());

    let response = app
        .oneshot(
            authed(
                Request::builder()
                    .method("POST")
                    .uri("/api/planner/tasks")
                    .header("content-type", "application/json"),
            )
            .body(Body::from(
                serde_json::to_vec(&json!({"title": "Ship it", "planId": "plan-1"})).unwrap(),
            ))
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["required"], json!(["bucketId"]));
}

#[tokio::test(flavor = "multi_thread")]
async fn create_task_returns_created_and_broadcasts() {
    let (app, broadcaster) = test_app(MockGraph::new());
    let mut subscription = broadcaster.subscribe();
    // Skip the synthetic connected event.
    subscription.try_recv().unwrap();

    let response = app
        .oneshot(
            authed(
                Request::builder()
                    .method("POST")
                    .uri("/api/planner/tasks")
                    .header("content-type", "application/json"),
            )
            .body(Body::from(
                serde_json::to_vec(&json!({
                    "title": "Ship it",
                    "planId": "plan-1",
                    "bucketId": "bucket-1"
                }))
                .unwrap(),
            ))
            .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Ship it");
    let id = body["id"].as_str().unwrap();

    let event = subscription
        .try_recv()
        .expect("task_created should have been broadcast");
    assert_eq!(event.kind, crate::events::EventKind::TaskCreated);
    assert_eq!(event.payload["id"], id);
}

#[tokio::test(flavor = "multi_thread")]
async fn upstream_failure_maps_to_bad_gateway() {
    let (app, _) = test_app(MockGraph::failing(503, "ServiceNotAvailable"));

    let response = app
        .oneshot(
            authed(Request::builder().uri("/api/planner/tasks"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Graph API error");
    assert!(body["details"].as_str().unwrap().contains("503"));
}
