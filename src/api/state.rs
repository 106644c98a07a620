//! Application state for the API server.

use std::sync::Arc;

use crate::events::EventBroadcaster;
use crate::graph::GraphApi;

/// Shared application state.
///
/// Generic over `G: GraphApi` so the handlers can run against a stub Graph
/// in tests; dependencies are injected via the constructor.
pub struct AppState<G: GraphApi> {
    graph: Arc<G>,
    broadcaster: EventBroadcaster,
}

// Manual Clone impl - only the Arc needs to be cloneable, not G.
impl<G: GraphApi> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            broadcaster: self.broadcaster.clone(),
        }
    }
}

impl<G: GraphApi> AppState<G> {
    pub fn new(graph: G, broadcaster: EventBroadcaster) -> Self {
        Self {
            graph: Arc::new(graph),
            broadcaster,
        }
    }

    pub fn graph(&self) -> &G {
        &self.graph
    }

    pub fn broadcaster(&self) -> &EventBroadcaster {
        &self.broadcaster
    }
}
