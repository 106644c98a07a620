//! In-memory `GraphApi` stub for tests.
//!
//! Serves canned resources and mints sequential ids on create, so tool and
//! handler tests can run without a network or a live tenant.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;

use crate::error::{GraphError, GraphResult};
use crate::graph::api::GraphApi;
use crate::graph::models::{
    CalendarEvent, Contact, ContactQuery, EventQuery, NewCalendarEvent, NewContact,
    NewPlannerTask, PlannerBucket, PlannerPlan, PlannerTask,
};

#[derive(Default)]
pub(crate) struct MockGraph {
    pub tasks: Mutex<Vec<PlannerTask>>,
    pub plans: Vec<PlannerPlan>,
    pub buckets: Vec<PlannerBucket>,
    pub contacts: Mutex<Vec<Contact>>,
    pub events: Mutex<Vec<CalendarEvent>>,
    next_id: AtomicU32,
    /// When set, every call fails with this status/message pair.
    pub fail: Option<(u16, String)>,
}

impl MockGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<PlannerTask>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
            ..Self::default()
        }
    }

    pub fn with_plan(mut self, plan: PlannerPlan, buckets: Vec<PlannerBucket>) -> Self {
        self.plans.push(plan);
        self.buckets.extend(buckets);
        self
    }

    pub fn with_contacts(mut self, contacts: Vec<Contact>) -> Self {
        self.contacts = Mutex::new(contacts);
        self
    }

    pub fn with_events(mut self, events: Vec<CalendarEvent>) -> Self {
        self.events = Mutex::new(events);
        self
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self {
            fail: Some((status, message.to_string())),
            ..Self::default()
        }
    }

    fn mint_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn check_fail(&self) -> GraphResult<()> {
        match &self.fail {
            Some((401, _)) => Err(GraphError::Unauthorized),
            Some((404, message)) => Err(GraphError::NotFound {
                resource: message.clone(),
            }),
            Some((status, message)) => Err(GraphError::Api {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl GraphApi for MockGraph {
    async fn list_tasks(
        &self,
        _token: &str,
        plan_id: Option<&str>,
    ) -> GraphResult<Vec<PlannerTask>> {
        self.check_fail()?;
        let tasks = self.tasks.lock().unwrap();
        Ok(tasks
            .iter()
            .filter(|t| plan_id.is_none_or(|p| t.plan_id == p))
            .cloned()
            .collect())
    }

    async fn get_task(&self, _token: &str, id: &str) -> GraphResult<PlannerTask> {
        self.check_fail()?;
        self.tasks
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| GraphError::NotFound {
                resource: format!("planner task '{id}'"),
            })
    }

    async fn create_task(&self, _token: &str, input: &NewPlannerTask) -> GraphResult<PlannerTask> {
        self.check_fail()?;
        let task = PlannerTask {
            id: self.mint_id("task"),
            plan_id: input.plan_id.clone(),
            bucket_id: input.bucket_id.clone(),
            title: input.title.clone(),
            percent_complete: input.percent_complete.unwrap_or(0),
            due_date_time: input.due_date_time.clone(),
            created_date_time: Some("2025-01-01T00:00:00Z".to_string()),
            ..Default::default()
        };
        self.tasks.lock().unwrap().push(task.clone());
        Ok(task)
    }

    async fn get_plan(&self, _token: &str, id: &str) -> GraphResult<PlannerPlan> {
        self.check_fail()?;
        self.plans
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| GraphError::NotFound {
                resource: format!("planner plan '{id}'"),
            })
    }

    async fn get_bucket(&self, _token: &str, id: &str) -> GraphResult<PlannerBucket> {
        self.check_fail()?;
        self.buckets
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| GraphError::NotFound {
                resource: format!("planner bucket '{id}'"),
            })
    }

    async fn list_buckets(&self, _token: &str, plan_id: &str) -> GraphResult<Vec<PlannerBucket>> {
        self.check_fail()?;
        Ok(self
            .buckets
            .iter()
            .filter(|b| b.plan_id == plan_id)
            .cloned()
            .collect())
    }

    async fn list_contacts(&self, _token: &str, query: &ContactQuery) -> GraphResult<Vec<Contact>> {
        self.check_fail()?;
        let contacts = self.contacts.lock().unwrap();
        let mut matching: Vec<Contact> = contacts
            .iter()
            .filter(|c| {
                query.search.as_deref().is_none_or(|prefix| {
                    c.display_name
                        .as_deref()
                        .is_some_and(|name| name.starts_with(prefix))
                })
            })
            .cloned()
            .collect();
        if let Some(limit) = query.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    async fn create_contact(&self, _token: &str, input: &NewContact) -> GraphResult<Contact> {
        self.check_fail()?;
        let display_name = match &input.surname {
            Some(surname) => format!("{} {}", input.given_name, surname),
            None => input.given_name.clone(),
        };
        let contact = Contact {
            id: self.mint_id("contact"),
            display_name: Some(display_name),
            given_name: Some(input.given_name.clone()),
            surname: input.surname.clone(),
            email_addresses: input.email_addresses.clone(),
            business_phones: input.business_phones.clone(),
            mobile_phone: input.mobile_phone.clone(),
            company_name: input.company_name.clone(),
            ..Default::default()
        };
        self.contacts.lock().unwrap().push(contact.clone());
        Ok(contact)
    }

    async fn list_events(
        &self,
        _token: &str,
        query: &EventQuery,
    ) -> GraphResult<Vec<CalendarEvent>> {
        self.check_fail()?;
        let events = self.events.lock().unwrap();
        let mut matching: Vec<CalendarEvent> = events.iter().cloned().collect();
        if let Some(limit) = query.limit {
            matching.truncate(limit);
        }
        Ok(matching)
    }

    async fn create_event(
        &self,
        _token: &str,
        input: &NewCalendarEvent,
    ) -> GraphResult<CalendarEvent> {
        self.check_fail()?;
        let event = CalendarEvent {
            id: self.mint_id("event"),
            subject: Some(input.subject.clone()),
            body_preview: input.body.as_ref().map(|b| b.content.clone()),
            start: input.start.clone(),
            end: input.end.clone(),
            location: input.location.clone(),
            attendees: input.attendees.clone(),
            ..Default::default()
        };
        self.events.lock().unwrap().push(event.clone());
        Ok(event)
    }
}
