//! Tests for Graph client plumbing that needs no live connection.

use super::client::GraphClient;
use super::models::{Contact, ListEnvelope, NewPlannerTask, PlannerTask};

#[test]
fn base_url_is_kept_verbatim() {
    let client = GraphClient::new("https://graph.microsoft.com/v1.0");
    assert_eq!(client.base_url(), "https://graph.microsoft.com/v1.0");
}

#[test]
fn planner_task_deserializes_from_graph_shape() {
    let json = r#"{
        "id": "t1",
        "planId": "p1",
        "bucketId": "b1",
        "title": "Ship the report",
        "percentComplete": 50,
        "dueDateTime": "2025-06-01T00:00:00Z",
        "createdDateTime": "2025-05-01T12:00:00Z",
        "assignments": {}
    }"#;

    let task: PlannerTask = serde_json::from_str(json).unwrap();
    assert_eq!(task.id, "t1");
    assert_eq!(task.plan_id, "p1");
    assert_eq!(task.bucket_id, "b1");
    assert_eq!(task.percent_complete, 50);
    assert_eq!(task.due_date_time.as_deref(), Some("2025-06-01T00:00:00Z"));
    assert!(task.completed_date_time.is_none());
}

#[test]
fn collection_envelope_unwraps_value() {
    let json = r#"{"@odata.context": "...", "value": [{"id": "c1", "displayName": "Ada"}]}"#;
    let envelope: ListEnvelope<Contact> = serde_json::from_str(json).unwrap();
    assert_eq!(envelope.value.len(), 1);
    assert_eq!(envelope.value[0].display_name.as_deref(), Some("Ada"));
}

#[test]
fn empty_envelope_defaults_to_no_items() {
    let envelope: ListEnvelope<Contact> = serde_json::from_str("{}").unwrap();
    assert!(envelope.value.is_empty());
}

#[test]
fn new_task_serializes_camel_case_and_skips_absent_fields() {
    let input = NewPlannerTask {
        plan_id: "p1".to_string(),
        bucket_id: "b1".to_string(),
        title: "New task".to_string(),
        due_date_time: None,
        percent_complete: None,
    };

    let json = serde_json::to_value(&input).unwrap();
    assert_eq!(json["planId"], "p1");
    assert_eq!(json["bucketId"], "b1");
    assert_eq!(json["title"], "New task");
    assert!(json.get("dueDateTime").is_none());
    assert!(json.get("percentComplete").is_none());
}
