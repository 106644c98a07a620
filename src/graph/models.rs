//! Wire DTOs for the Graph resources this crate exposes.
//!
//! Field names follow Graph's camelCase on the wire. Response types default
//! missing fields so partial `$select` projections still deserialize.

use serde::{Deserialize, Serialize};

/// Graph wraps every collection response in a `value` array.
#[derive(Debug, Deserialize)]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

// =============================================================================
// Planner
// =============================================================================

/// A task in a Planner plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerTask {
    pub id: String,
    pub plan_id: String,
    pub bucket_id: String,
    pub title: String,
    /// 0 = not started, 1-99 = in progress, 100 = completed.
    pub percent_complete: i32,
    pub priority: Option<i32>,
    pub due_date_time: Option<String>,
    pub created_date_time: Option<String>,
    pub completed_date_time: Option<String>,
}

impl Default for PlannerTask {
    fn default() -> Self {
        Self {
            id: String::new(),
            plan_id: String::new(),
            bucket_id: String::new(),
            title: String::new(),
            percent_complete: 0,
            priority: None,
            due_date_time: None,
            created_date_time: None,
            completed_date_time: None,
        }
    }
}

/// Input for task creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlannerTask {
    pub plan_id: String,
    pub bucket_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_complete: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerPlan {
    pub id: String,
    pub title: String,
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct PlannerBucket {
    pub id: String,
    pub name: String,
    pub plan_id: String,
}

// =============================================================================
// Contacts
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct EmailAddress {
    pub name: Option<String>,
    pub address: String,
}

/// An Outlook personal contact.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub id: String,
    pub display_name: Option<String>,
    pub given_name: Option<String>,
    pub surname: Option<String>,
    pub email_addresses: Vec<EmailAddress>,
    pub business_phones: Vec<String>,
    pub mobile_phone: Option<String>,
    pub company_name: Option<String>,
    pub job_title: Option<String>,
}

/// Input for contact creation.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewContact {
    pub given_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub business_phones: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

/// Name-prefix search plus result cap for contact listing.
#[derive(Debug, Clone, Default)]
pub struct ContactQuery {
    pub search: Option<String>,
    pub limit: Option<usize>,
}

// =============================================================================
// Calendar
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DateTimeTimeZone {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Location {
    pub display_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Attendee {
    pub email_address: EmailAddress,
    #[serde(rename = "type")]
    pub attendee_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemBody {
    pub content_type: String,
    pub content: String,
}

/// An Outlook calendar event.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarEvent {
    pub id: String,
    pub subject: Option<String>,
    pub body_preview: Option<String>,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
    pub location: Option<Location>,
    pub attendees: Vec<Attendee>,
    pub is_all_day: Option<bool>,
    pub web_link: Option<String>,
}

/// Input for event creation.
#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewCalendarEvent {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<ItemBody>,
    pub start: DateTimeTimeZone,
    pub end: DateTimeTimeZone,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attendees: Vec<Attendee>,
}

/// Time window plus result cap for event listing.
///
/// When both ends of the window are present the client queries
/// `calendarView`; otherwise it lists upcoming events.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<usize>,
}
