//! MCP tool implementations, one module per Graph entity.
//!
//! Each module contributes a named tool router to `GraphMcp` via
//! `#[tool_router(router = ...)]`; the server combines them at
//! construction.

mod calendar;
mod contacts;
mod planner;

#[cfg(test)]
mod contacts_test;

pub use calendar::{CreateEventParams, ListEventsParams};
pub use contacts::{CreateContactParams, ListContactsParams};
pub use planner::{
    CreatePlannerTaskParams, GetPlannerTaskParams, GetPlannerTasksParams, ListPlanBucketsParams,
};

use rmcp::model::{CallToolResult, Content};

use crate::error::GraphError;

/// Default and ceiling for listing tools.
pub(crate) const DEFAULT_LIMIT: usize = 25;
pub(crate) const MAX_LIMIT: usize = 50;

/// Clamp a requested limit to the allowed range.
pub(crate) fn apply_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
}

/// Render an upstream Graph failure as an error tool result.
///
/// Per the error model, upstream failures become descriptive text with the
/// `isError` flag set; they are not retried and not raised as protocol
/// errors.
pub(crate) fn graph_failure(error: GraphError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!(
        "Microsoft Graph request failed: {error}"
    ))])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_limit_defaults_and_clamps() {
        assert_eq!(apply_limit(None), DEFAULT_LIMIT);
        assert_eq!(apply_limit(Some(5)), 5);
        assert_eq!(apply_limit(Some(500)), MAX_LIMIT);
    }

    #[test]
    fn graph_failure_sets_is_error() {
        let result = graph_failure(GraphError::Unauthorized);
        assert_eq!(result.is_error, Some(true));
    }
}
