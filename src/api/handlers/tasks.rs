//! Planner proxy handlers.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;

use crate::api::auth::AccessToken;
use crate::api::state::AppState;
use crate::events::EventKind;
use crate::graph::planner::{TaskStatusFilter, filter_by_status};
use crate::graph::{GraphApi, NewPlannerTask, PlannerTask};

use super::{ErrorResponse, MissingFieldsResponse, map_graph_error};

// =============================================================================
// DTOs
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListTasksQuery {
    /// Filter by completion state (notStarted, inProgress, completed)
    pub status: Option<String>,
}

#[derive(Serialize)]
pub struct TaskListResponse {
    pub items: Vec<PlannerTask>,
    pub total: usize,
}

/// Create-task request body. Everything optional so the handler can report
/// which required fields are absent instead of failing deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub plan_id: Option<String>,
    pub bucket_id: Option<String>,
    pub due_date_time: Option<String>,
    pub percent_complete: Option<i32>,
}

// =============================================================================
// Handlers
// =============================================================================

/// `GET /api/planner/tasks` — list tasks, optionally filtered by status.
///
/// The status filter is applied client-side against `percentComplete` after
/// the fetch; see `graph::planner` for the rule.
#[instrument(skip(state, token))]
pub async fn list_tasks<G: GraphApi>(
    State(state): State<AppState<G>>,
    Extension(token): Extension<AccessToken>,
    Query(query): Query<ListTasksQuery>,
) -> Result<Json<TaskListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let status = query
        .status
        .as_deref()
        .map(str::parse::<TaskStatusFilter>)
        .transpose()
        .map_err(|e| {
            (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid status filter".to_string(),
                    details: Some(e),
                }),
            )
        })?;

    let tasks = state
        .graph()
        .list_tasks(token.as_str(), None)
        .await
        .map_err(map_graph_error)?;

    let items = filter_by_status(tasks, status);
    let total = items.len();

    Ok(Json(TaskListResponse { items, total }))
}

/// `GET /api/planner/tasks/{id}` — task detail.
#[instrument(skip(state, token))]
pub async fn get_task<G: GraphApi>(
    State(state): State<AppState<G>>,
    Extension(token): Extension<AccessToken>,
    Path(id): Path<String>,
) -> Result<Json<PlannerTask>, (StatusCode, Json<ErrorResponse>)> {
    let task = state
        .graph()
        .get_task(token.as_str(), &id)
        .await
        .map_err(map_graph_error)?;

    Ok(Json(task))
}

/// `POST /api/planner/tasks` — create a task and broadcast `task_created`.
#[instrument(skip(state, token, req))]
pub async fn create_task<G: GraphApi>(
    State(state): State<AppState<G>>,
    Extension(token): Extension<AccessToken>,
    Json(req): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<PlannerTask>), axum::response::Response> {
    let mut missing = Vec::new();
    if req.title.as_deref().is_none_or(str::is_empty) {
        missing.push("title");
    }
    if req.plan_id.as_deref().is_none_or(str::is_empty) {
        missing.push("planId");
    }
    if req.bucket_id.as_deref().is_none_or(str::is_empty) {
        missing.push("bucketId");
    }
    if !missing.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            Json(MissingFieldsResponse {
                error: "Missing required fields".to_string(),
                required: missing,
            }),
        ));
    }

    // Validated present above; the defaults are unreachable.
    let input = NewPlannerTask {
        plan_id: req.plan_id.unwrap_or_default(),
        bucket_id: req.bucket_id.unwrap_or_default(),
        title: req.title.unwrap_or_default(),
        due_date_time: req.due_date_time,
        percent_complete: req.percent_complete,
    };

    let task = state
        .graph()
        .create_task(token.as_str(), &input)
        .await
        .map_err(|e| {
            let (status, body) = map_graph_error(e);
            error_response(status, body)
        })?;

    // Fan the change out to event-stream subscribers; delivery problems are
    // the broadcaster's to handle, never this request's.
    let payload = serde_json::to_value(&task).unwrap_or_else(|_| json!({ "id": task.id }));
    state.broadcaster().broadcast(EventKind::TaskCreated, payload);

    Ok((StatusCode::CREATED, Json(task)))
}

fn error_response<B: Serialize>(status: StatusCode, body: Json<B>) -> axum::response::Response {
    use axum::response::IntoResponse;
    (status, body).into_response()
}
