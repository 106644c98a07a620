//! MCP tools for Planner tasks.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::graph::planner::{TaskStatusFilter, filter_by_status};
use crate::graph::{GraphApi, NewPlannerTask};
use crate::mcp::format;
use crate::mcp::server::GraphMcp;
use crate::mcp::tools::{apply_limit, graph_failure};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetPlannerTasksParams {
    #[schemars(
        description = "Plan ID to list tasks from. Omit to list tasks assigned to the signed-in user."
    )]
    pub plan_id: Option<String>,
    #[schemars(
        description = "Filter by completion state: 'notStarted' (0%), 'inProgress' (1-99%), or 'completed' (100%)."
    )]
    pub status: Option<String>,
    #[schemars(description = "Maximum number of tasks to return (default: 25, max: 50)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetPlannerTaskParams {
    #[schemars(description = "Planner task ID")]
    pub task_id: String,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreatePlannerTaskParams {
    #[schemars(description = "Task title")]
    pub title: String,
    #[schemars(description = "Plan ID the task belongs to")]
    pub plan_id: String,
    #[schemars(description = "Bucket ID within the plan. Use list_plan_buckets to find one.")]
    pub bucket_id: String,
    #[schemars(description = "Due date in ISO 8601 format (e.g. 2025-07-01T00:00:00Z). Optional.")]
    pub due_date_time: Option<String>,
    #[schemars(description = "Initial completion percentage (0-100). Optional, defaults to 0.")]
    pub percent_complete: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListPlanBucketsParams {
    #[schemars(description = "Plan ID to list buckets from")]
    pub plan_id: String,
}

// =============================================================================
// Tools
// =============================================================================

#[tool_router(router = planner_router, vis = "pub")]
impl<G: GraphApi + 'static> GraphMcp<G> {
    #[tool(
        description = "List Planner tasks, optionally scoped to a plan and filtered by completion state. Use this to see current work before creating new tasks."
    )]
    pub async fn get_planner_tasks(
        &self,
        params: Parameters<GetPlannerTasksParams>,
    ) -> Result<CallToolResult, McpError> {
        let status = params
            .0
            .status
            .as_deref()
            .map(str::parse::<TaskStatusFilter>)
            .transpose()
            .map_err(|e| McpError::invalid_params(e, None))?;

        let tasks = match self
            .graph()
            .list_tasks(self.token(), params.0.plan_id.as_deref())
            .await
        {
            Ok(tasks) => tasks,
            Err(e) => return Ok(graph_failure(e)),
        };

        let mut tasks = filter_by_status(tasks, status);
        tasks.truncate(apply_limit(params.0.limit));

        Ok(CallToolResult::success(vec![Content::text(
            format::tasks_markdown(&tasks),
        )]))
    }

    #[tool(description = "Get a single Planner task by ID with full details.")]
    pub async fn get_planner_task(
        &self,
        params: Parameters<GetPlannerTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.graph().get_task(self.token(), &params.0.task_id).await {
            Ok(task) => Ok(CallToolResult::success(vec![Content::text(
                format::task_detail_markdown(&task),
            )])),
            Err(e) => Ok(graph_failure(e)),
        }
    }

    #[tool(
        description = "Create a Planner task in a plan and bucket. Verifies the plan and bucket exist first and reports their names in the confirmation."
    )]
    pub async fn create_planner_task(
        &self,
        params: Parameters<CreatePlannerTaskParams>,
    ) -> Result<CallToolResult, McpError> {
        if let Some(percent) = params.0.percent_complete
            && !(0..=100).contains(&percent)
        {
            return Err(McpError::invalid_params(
                "percent_complete must be between 0 and 100",
                None,
            ));
        }

        // Sequential lookups before the create, so a bad id fails with a
        // clear message instead of Graph's generic 400.
        let plan = match self.graph().get_plan(self.token(), &params.0.plan_id).await {
            Ok(plan) => plan,
            Err(e) => return Ok(graph_failure(e)),
        };
        let bucket = match self
            .graph()
            .get_bucket(self.token(), &params.0.bucket_id)
            .await
        {
            Ok(bucket) => bucket,
            Err(e) => return Ok(graph_failure(e)),
        };

        let input = NewPlannerTask {
            plan_id: params.0.plan_id.clone(),
            bucket_id: params.0.bucket_id.clone(),
            title: params.0.title.clone(),
            due_date_time: params.0.due_date_time.clone(),
            percent_complete: params.0.percent_complete,
        };

        match self.graph().create_task(self.token(), &input).await {
            Ok(task) => Ok(CallToolResult::success(vec![Content::text(
                format::task_created_markdown(&task, &plan, &bucket),
            )])),
            Err(e) => Ok(graph_failure(e)),
        }
    }

    #[tool(
        description = "List the buckets of a Planner plan. Needed to pick a bucket_id for create_planner_task."
    )]
    pub async fn list_plan_buckets(
        &self,
        params: Parameters<ListPlanBucketsParams>,
    ) -> Result<CallToolResult, McpError> {
        let plan = match self.graph().get_plan(self.token(), &params.0.plan_id).await {
            Ok(plan) => plan,
            Err(e) => return Ok(graph_failure(e)),
        };

        match self
            .graph()
            .list_buckets(self.token(), &params.0.plan_id)
            .await
        {
            Ok(buckets) => Ok(CallToolResult::success(vec![Content::text(
                format::buckets_markdown(&plan, &buckets),
            )])),
            Err(e) => Ok(graph_failure(e)),
        }
    }
}
