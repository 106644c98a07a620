//! Event broadcasting for the HTTP variant.
//!
//! # Architecture
//!
//! - `broadcaster`: subscriber registry and the point-to-multipoint
//!   delivery loop
//! - `frame`: pure wire-frame serialization, independent of the transport
//!
//! Events exist only for the duration of transmission; nothing here
//! persists or replays them.

mod broadcaster;
mod frame;


pub use broadcaster::{EventBroadcaster, Subscription};
pub use frame::wire_frame;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The closed set of event labels subscribers can receive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Synthetic first event on every new subscription.
    Connected,
    TaskCreated,
    TaskUpdated,
    TaskDeleted,
    Error,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::TaskCreated => "task_created",
            Self::TaskUpdated => "task_updated",
            Self::TaskDeleted => "task_deleted",
            Self::Error => "error",
        }
    }
}

/// An immutable record pushed to every live subscriber.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Event {
    pub kind: EventKind,
    pub payload: Value,
    /// Recorded when the broadcast (or subscription) happened.
    pub timestamp: DateTime<Utc>,
}

impl Event {
    pub fn now(kind: EventKind, payload: Value) -> Self {
        Self {
            kind,
            payload,
            timestamp: Utc::now(),
        }
    }
}
