//! Wire framing for the event stream.
//!
//! A frame is a type label line, a single `data:` line of JSON, and a blank
//! line — byte-compatible with `text/event-stream`, so any standard SSE
//! client library parses it unmodified. Serialization is a pure function of
//! the event so it can be tested without a live connection.

use serde_json::{Value, json};

use super::Event;

/// Render one event as a `text/event-stream` frame.
///
/// The `data` JSON is the payload object with the broadcast timestamp
/// merged in; a non-object payload is wrapped under a `data` key so the
/// timestamp always has somewhere to live.
pub fn wire_frame(event: &Event) -> String {
    let timestamp = event.timestamp.to_rfc3339();

    let data = match &event.payload {
        Value::Object(fields) => {
            let mut merged = fields.clone();
            merged.insert("timestamp".to_string(), Value::String(timestamp));
            Value::Object(merged)
        }
        other => json!({ "data": other, "timestamp": timestamp }),
    };

    format!("event: {}\ndata: {}\n\n", event.kind.as_str(), data)
}
