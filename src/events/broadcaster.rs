//! Point-to-multipoint event delivery.
//!
//! The broadcaster owns a registry of open subscriber channels. Broadcasting
//! snapshots the registry, then writes to each subscriber independently; a
//! failed write drops that subscriber and never disturbs the others or the
//! caller. Subscribers that go away are never retried.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::DashMap;
use serde_json::{Value, json};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{Event, EventKind};

struct Registry {
    next_id: AtomicU64,
    subscribers: DashMap<u64, mpsc::UnboundedSender<Event>>,
}

/// Fan-out publisher for task-change events.
///
/// Cheap to clone; clones share the registry.
#[derive(Clone)]
pub struct EventBroadcaster {
    registry: Arc<Registry>,
}

/// One subscriber's end of the stream.
///
/// Identified by a process-unique, monotonically-increasing token. Dropping
/// the subscription unregisters it.
pub struct Subscription {
    id: u64,
    rx: mpsc::UnboundedReceiver<Event>,
    registry: Arc<Registry>,
}

impl Default for EventBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBroadcaster {
    pub fn new() -> Self {
        // Ids are seeded from the broadcaster's creation time so they stay
        // unique across restarts, and incremented atomically so they stay
        // monotonic within the process.
        let seed = Utc::now().timestamp_millis().max(0) as u64;
        Self {
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(seed),
                subscribers: DashMap::new(),
            }),
        }
    }

    /// Register a new subscriber.
    ///
    /// The subscription immediately carries a synthetic `connected` event
    /// with its identifier and a timestamp.
    pub fn subscribe(&self) -> Subscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        let hello = Event::now(EventKind::Connected, json!({ "subscriberId": id }));
        // The receiver is alive right here, so this cannot fail.
        let _ = tx.send(hello);

        self.registry.subscribers.insert(id, tx);
        debug!(subscriber = id, "event stream subscribed");

        Subscription {
            id,
            rx,
            registry: Arc::clone(&self.registry),
        }
    }

    /// Remove a subscriber. Unknown or already-removed ids are a no-op.
    pub fn unsubscribe(&self, id: u64) {
        if self.registry.subscribers.remove(&id).is_some() {
            debug!(subscriber = id, "event stream unsubscribed");
        }
    }

    /// Deliver `payload` under `kind` to every current subscriber.
    ///
    /// A write failure (subscriber hung up) removes that subscriber and is
    /// logged, not returned; delivery to the rest continues.
    pub fn broadcast(&self, kind: EventKind, payload: Value) {
        let event = Event::now(kind, payload);

        // Snapshot before iterating so concurrent unsubscribes cannot race
        // the removal below.
        let targets: Vec<(u64, mpsc::UnboundedSender<Event>)> = self
            .registry
            .subscribers
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();

        for (id, tx) in targets {
            if tx.send(event.clone()).is_err() {
                warn!(subscriber = id, kind = kind.as_str(), "dropping dead event subscriber");
                self.registry.subscribers.remove(&id);
            }
        }
    }

    /// Number of currently-registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.registry.subscribers.len()
    }
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Receive the next event; `None` once unsubscribed with no events left.
    pub async fn recv(&mut self) -> Option<Event> {
        self.rx.recv().await
    }

    /// Non-blocking receive, for draining in tests.
    pub fn try_recv(&mut self) -> Option<Event> {
        self.rx.try_recv().ok()
    }

    /// Close the receiving half without unregistering, so the next
    /// broadcast sees a write failure on a still-registered subscriber.
    #[cfg(test)]
    pub(crate) fn close_channel(&mut self) {
        self.rx.close();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.registry.subscribers.remove(&self.id).is_some() {
            debug!(subscriber = self.id, "event stream closed");
        }
    }
}
