//! MCP tools for calendar events.

use rmcp::{
    ErrorData as McpError,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};

use crate::graph::{
    Attendee, DateTimeTimeZone, EmailAddress, EventQuery, GraphApi, ItemBody, Location,
    NewCalendarEvent,
};
use crate::mcp::format;
use crate::mcp::server::GraphMcp;
use crate::mcp::tools::{apply_limit, graph_failure};

// =============================================================================
// Parameter Structs
// =============================================================================

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListEventsParams {
    #[schemars(
        description = "Window start in ISO 8601 (e.g. 2025-07-01T00:00:00). Both start and end must be given to window the listing; otherwise upcoming events are listed."
    )]
    pub start: Option<String>,
    #[schemars(description = "Window end in ISO 8601. See start.")]
    pub end: Option<String>,
    #[schemars(description = "Maximum number of events to return (default: 25, max: 50)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateEventParams {
    #[schemars(description = "Event subject line")]
    pub subject: String,
    #[schemars(description = "Start time in ISO 8601 (e.g. 2025-07-01T09:00:00)")]
    pub start: String,
    #[schemars(description = "End time in ISO 8601")]
    pub end: String,
    #[schemars(description = "IANA time zone for start/end (default: UTC)")]
    pub time_zone: Option<String>,
    #[schemars(description = "Location name. Optional.")]
    pub location: Option<String>,
    #[schemars(description = "Event body text. Optional.")]
    pub body: Option<String>,
    #[schemars(description = "Attendee email addresses. Optional.")]
    pub attendees: Option<Vec<String>>,
}

// =============================================================================
// Tools
// =============================================================================

#[tool_router(router = calendar_router, vis = "pub")]
impl<G: GraphApi + 'static> GraphMcp<G> {
    #[tool(
        description = "List calendar events for the signed-in user, optionally restricted to a start/end window."
    )]
    pub async fn list_events(
        &self,
        params: Parameters<ListEventsParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.0.start.is_some() != params.0.end.is_some() {
            return Err(McpError::invalid_params(
                "start and end must be given together",
                None,
            ));
        }

        let query = EventQuery {
            start: params.0.start.clone(),
            end: params.0.end.clone(),
            limit: Some(apply_limit(params.0.limit)),
        };

        match self.graph().list_events(self.token(), &query).await {
            Ok(events) => Ok(CallToolResult::success(vec![Content::text(
                format::events_markdown(&events),
            )])),
            Err(e) => Ok(graph_failure(e)),
        }
    }

    #[tool(
        description = "Create a calendar event. Times are interpreted in time_zone (UTC when omitted); attendees receive invitations."
    )]
    pub async fn create_event(
        &self,
        params: Parameters<CreateEventParams>,
    ) -> Result<CallToolResult, McpError> {
        if params.0.subject.trim().is_empty() {
            return Err(McpError::invalid_params("subject must not be empty", None));
        }

        let time_zone = params.0.time_zone.clone().unwrap_or_else(|| "UTC".to_string());

        let attendees = params
            .0
            .attendees
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|address| Attendee {
                email_address: EmailAddress {
                    name: None,
                    address,
                },
                attendee_type: Some("required".to_string()),
            })
            .collect();

        let input = NewCalendarEvent {
            subject: params.0.subject.clone(),
            body: params.0.body.clone().map(|content| ItemBody {
                content_type: "text".to_string(),
                content,
            }),
            start: DateTimeTimeZone {
                date_time: params.0.start.clone(),
                time_zone: time_zone.clone(),
            },
            end: DateTimeTimeZone {
                date_time: params.0.end.clone(),
                time_zone,
            },
            location: params.0.location.clone().map(|display_name| Location {
                display_name,
            }),
            attendees,
        };

        match self.graph().create_event(self.token(), &input).await {
            Ok(event) => Ok(CallToolResult::success(vec![Content::text(
                format::event_created_markdown(&event),
            )])),
            Err(e) => Ok(graph_failure(e)),
        }
    }
}
