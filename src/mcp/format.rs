//! Markdown rendering of Graph resources for tool responses.
//!
//! Pure functions: each takes the already-fetched resources and returns the
//! text block handed back to the model.

use crate::graph::planner::status_label;
use crate::graph::{
    CalendarEvent, Contact, PlannerBucket, PlannerPlan, PlannerTask,
};

pub fn tasks_markdown(tasks: &[PlannerTask]) -> String {
    if tasks.is_empty() {
        return "No Planner tasks found.".to_string();
    }

    let mut out = format!("## Planner tasks ({})\n\n", tasks.len());
    for task in tasks {
        out.push_str(&format!(
            "- **{}** — {} ({}%)",
            task.title,
            status_label(task.percent_complete),
            task.percent_complete
        ));
        if let Some(due) = &task.due_date_time {
            out.push_str(&format!(", due {due}"));
        }
        out.push_str(&format!("\n  id: `{}`\n", task.id));
    }
    out
}

pub fn task_detail_markdown(task: &PlannerTask) -> String {
    let mut out = format!("## {}\n\n", task.title);
    out.push_str(&format!("- id: `{}`\n", task.id));
    out.push_str(&format!("- plan: `{}`\n", task.plan_id));
    out.push_str(&format!("- bucket: `{}`\n", task.bucket_id));
    out.push_str(&format!(
        "- status: {} ({}%)\n",
        status_label(task.percent_complete),
        task.percent_complete
    ));
    if let Some(priority) = task.priority {
        out.push_str(&format!("- priority: {priority}\n"));
    }
    if let Some(due) = &task.due_date_time {
        out.push_str(&format!("- due: {due}\n"));
    }
    if let Some(created) = &task.created_date_time {
        out.push_str(&format!("- created: {created}\n"));
    }
    if let Some(completed) = &task.completed_date_time {
        out.push_str(&format!("- completed: {completed}\n"));
    }
    out
}

pub fn task_created_markdown(
    task: &PlannerTask,
    plan: &PlannerPlan,
    bucket: &PlannerBucket,
) -> String {
    format!(
        "Created task **{}** in plan **{}**, bucket **{}**.\n\n- id: `{}`\n",
        task.title, plan.title, bucket.name, task.id
    )
}

pub fn buckets_markdown(plan: &PlannerPlan, buckets: &[PlannerBucket]) -> String {
    if buckets.is_empty() {
        return format!("Plan **{}** has no buckets.", plan.title);
    }

    let mut out = format!("## Buckets in {} ({})\n\n", plan.title, buckets.len());
    for bucket in buckets {
        out.push_str(&format!("- **{}** — id: `{}`\n", bucket.name, bucket.id));
    }
    out
}

pub fn contacts_markdown(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "No contacts found.".to_string();
    }

    let mut out = format!("## Contacts ({})\n\n", contacts.len());
    for contact in contacts {
        let name = contact
            .display_name
            .clone()
            .or_else(|| contact.given_name.clone())
            .unwrap_or_else(|| "(unnamed)".to_string());
        out.push_str(&format!("- **{name}**"));
        if let Some(email) = contact.email_addresses.first() {
            out.push_str(&format!(" <{}>", email.address));
        }
        if let Some(company) = &contact.company_name {
            out.push_str(&format!(", {company}"));
        }
        out.push_str(&format!("\n  id: `{}`\n", contact.id));
    }
    out
}

pub fn contact_created_markdown(contact: &Contact) -> String {
    let name = contact
        .display_name
        .clone()
        .or_else(|| contact.given_name.clone())
        .unwrap_or_else(|| "(unnamed)".to_string());
    format!("Created contact **{}**.\n\n- id: `{}`\n", name, contact.id)
}

pub fn events_markdown(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "No calendar events found.".to_string();
    }

    let mut out = format!("## Calendar events ({})\n\n", events.len());
    for event in events {
        let subject = event.subject.as_deref().unwrap_or("(no subject)");
        out.push_str(&format!(
            "- **{}** — {} to {}",
            subject, event.start.date_time, event.end.date_time
        ));
        if let Some(location) = &event.location
            && !location.display_name.is_empty()
        {
            out.push_str(&format!(" @ {}", location.display_name));
        }
        out.push_str(&format!("\n  id: `{}`\n", event.id));
    }
    out
}

pub fn event_created_markdown(event: &CalendarEvent) -> String {
    format!(
        "Created event **{}** from {} to {}.\n\n- id: `{}`\n",
        event.subject.as_deref().unwrap_or("(no subject)"),
        event.start.date_time,
        event.end.date_time,
        event.id
    )
}
