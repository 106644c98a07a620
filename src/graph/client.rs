//! Live Graph REST client.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::GraphConfig;
use crate::error::{GraphError, GraphResult};
use crate::graph::api::GraphApi;
use crate::graph::models::{
    CalendarEvent, Contact, ContactQuery, EventQuery, ListEnvelope, NewCalendarEvent, NewContact,
    NewPlannerTask, PlannerBucket, PlannerPlan, PlannerTask,
};

/// Graph's error envelope: `{"error":{"code":...,"message":...}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// Thin reqwest wrapper over the Graph REST API.
///
/// Holds no credential of its own; every call takes the bearer token it
/// should present. One outstanding request per call, no retries.
#[derive(Clone)]
pub struct GraphClient {
    base_url: String,
    client: Client,
}

impl GraphClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn from_config(config: &GraphConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        query: &[(&str, String)],
    ) -> GraphResult<T> {
        debug!("GET {}{}", self.base_url, path);
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn post_json<B: serde::Serialize, T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
        body: &B,
    ) -> GraphResult<T> {
        debug!("POST {}{}", self.base_url, path);
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Map a Graph response to a typed result.
    ///
    /// Success decodes the body; failure decodes the error envelope and maps
    /// the status onto `GraphError`. Nothing is retried.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> GraphResult<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) if envelope.error.code.is_empty() => envelope.error.message,
            Ok(envelope) => format!("{}: {}", envelope.error.code, envelope.error.message),
            Err(_) => format!("Graph returned HTTP {}", status.as_u16()),
        };

        Err(match status {
            StatusCode::UNAUTHORIZED => GraphError::Unauthorized,
            StatusCode::NOT_FOUND => GraphError::NotFound { resource: message },
            StatusCode::BAD_REQUEST => GraphError::BadRequest { message },
            _ => GraphError::Api {
                status: status.as_u16(),
                message,
            },
        })
    }
}

/// Escape a literal for an OData string: single quotes double.
fn odata_quote(s: &str) -> String {
    s.replace('\'', "''")
}

#[async_trait]
impl GraphApi for GraphClient {
    async fn list_tasks(
        &self,
        token: &str,
        plan_id: Option<&str>,
    ) -> GraphResult<Vec<PlannerTask>> {
        let path = match plan_id {
            Some(plan_id) => format!("/planner/plans/{plan_id}/tasks"),
            None => "/me/planner/tasks".to_string(),
        };
        let envelope: ListEnvelope<PlannerTask> = self.get_json(token, &path, &[]).await?;
        Ok(envelope.value)
    }

    async fn get_task(&self, token: &str, id: &str) -> GraphResult<PlannerTask> {
        self.get_json(token, &format!("/planner/tasks/{id}"), &[])
            .await
            .map_err(|e| match e {
                GraphError::NotFound { .. } => GraphError::NotFound {
                    resource: format!("planner task '{id}'"),
                },
                other => other,
            })
    }

    async fn create_task(&self, token: &str, input: &NewPlannerTask) -> GraphResult<PlannerTask> {
        self.post_json(token, "/planner/tasks", input).await
    }

    async fn get_plan(&self, token: &str, id: &str) -> GraphResult<PlannerPlan> {
        self.get_json(token, &format!("/planner/plans/{id}"), &[])
            .await
            .map_err(|e| match e {
                GraphError::NotFound { .. } => GraphError::NotFound {
                    resource: format!("planner plan '{id}'"),
                },
                other => other,
            })
    }

    async fn get_bucket(&self, token: &str, id: &str) -> GraphResult<PlannerBucket> {
        self.get_json(token, &format!("/planner/buckets/{id}"), &[])
            .await
            .map_err(|e| match e {
                GraphError::NotFound { .. } => GraphError::NotFound {
                    resource: format!("planner bucket '{id}'"),
                },
                other => other,
            })
    }

    async fn list_buckets(&self, token: &str, plan_id: &str) -> GraphResult<Vec<PlannerBucket>> {
        let envelope: ListEnvelope<PlannerBucket> = self
            .get_json(token, &format!("/planner/plans/{plan_id}/buckets"), &[])
            .await?;
        Ok(envelope.value)
    }

    async fn list_contacts(&self, token: &str, query: &ContactQuery) -> GraphResult<Vec<Contact>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(search) = &query.search {
            params.push((
                "$filter",
                format!("startswith(displayName,'{}')", odata_quote(search)),
            ));
        }
        if let Some(limit) = query.limit {
            params.push(("$top", limit.to_string()));
        }
        let envelope: ListEnvelope<Contact> = self.get_json(token, "/me/contacts", &params).await?;
        Ok(envelope.value)
    }

    async fn create_contact(&self, token: &str, input: &NewContact) -> GraphResult<Contact> {
        self.post_json(token, "/me/contacts", input).await
    }

    async fn list_events(
        &self,
        token: &str,
        query: &EventQuery,
    ) -> GraphResult<Vec<CalendarEvent>> {
        let mut params: Vec<(&str, String)> =
            vec![("$orderby", "start/dateTime".to_string())];
        if let Some(limit) = query.limit {
            params.push(("$top", limit.to_string()));
        }

        // calendarView needs both window ends; without a full window, list
        // the mailbox events directly.
        let path = if let (Some(start), Some(end)) = (&query.start, &query.end) {
            params.push(("startDateTime", start.clone()));
            params.push(("endDateTime", end.clone()));
            "/me/calendarView"
        } else {
            "/me/events"
        };

        let envelope: ListEnvelope<CalendarEvent> = self.get_json(token, path, &params).await?;
        Ok(envelope.value)
    }

    async fn create_event(
        &self,
        token: &str,
        input: &NewCalendarEvent,
    ) -> GraphResult<CalendarEvent> {
        self.post_json(token, "/me/events", input).await
    }
}
