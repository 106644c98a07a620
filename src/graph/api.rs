//! The `GraphApi` trait — the seam between tool/handler code and the live
//! Graph client, allowing a stub implementation in tests.
//!
//! Every method takes the bearer token explicitly: the MCP server passes
//! the credential it acquired at startup, while the HTTP variant forwards
//! whatever bearer the caller presented.

use async_trait::async_trait;

use crate::error::GraphResult;
use crate::graph::models::{
    CalendarEvent, Contact, ContactQuery, EventQuery, NewCalendarEvent, NewContact,
    NewPlannerTask, PlannerBucket, PlannerPlan, PlannerTask,
};

/// Graph operations used by the tools and HTTP handlers.
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// List tasks — for a specific plan when `plan_id` is given, otherwise
    /// the tasks assigned to the signed-in user.
    async fn list_tasks(&self, token: &str, plan_id: Option<&str>)
    -> GraphResult<Vec<PlannerTask>>;

    /// Fetch a single task by id.
    async fn get_task(&self, token: &str, id: &str) -> GraphResult<PlannerTask>;

    /// Create a task.
    async fn create_task(&self, token: &str, input: &NewPlannerTask) -> GraphResult<PlannerTask>;

    /// Fetch a plan by id.
    async fn get_plan(&self, token: &str, id: &str) -> GraphResult<PlannerPlan>;

    /// Fetch a bucket by id.
    async fn get_bucket(&self, token: &str, id: &str) -> GraphResult<PlannerBucket>;

    /// List the buckets of a plan.
    async fn list_buckets(&self, token: &str, plan_id: &str) -> GraphResult<Vec<PlannerBucket>>;

    /// List the signed-in user's contacts.
    async fn list_contacts(&self, token: &str, query: &ContactQuery) -> GraphResult<Vec<Contact>>;

    /// Create a contact.
    async fn create_contact(&self, token: &str, input: &NewContact) -> GraphResult<Contact>;

    /// List calendar events, windowed when the query carries both ends.
    async fn list_events(&self, token: &str, query: &EventQuery)
    -> GraphResult<Vec<CalendarEvent>>;

    /// Create a calendar event.
    async fn create_event(
        &self,
        token: &str,
        input: &NewCalendarEvent,
    ) -> GraphResult<CalendarEvent>;
}
