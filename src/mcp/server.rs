//! MCP server coordinator.
//!
//! `GraphMcp` holds the Graph client and the credential acquired at
//! startup, and combines the per-entity tool routers from `tools/` into a
//! single router. The credential is read-only after construction.

use std::sync::Arc;

use rmcp::{
    ServerHandler,
    handler::server::router::tool::ToolRouter,
    model::{ServerCapabilities, ServerInfo},
    tool_handler,
};

use crate::graph::GraphApi;

/// Main MCP server.
///
/// Generic over `G: GraphApi` so tool code never depends on the live
/// client directly.
pub struct GraphMcp<G: GraphApi> {
    graph: Arc<G>,
    token: Arc<str>,
    tool_router: ToolRouter<Self>,
}

// Manual Clone: only the Arcs are cloned, G itself need not be Clone.
impl<G: GraphApi> Clone for GraphMcp<G> {
    fn clone(&self) -> Self {
        Self {
            graph: Arc::clone(&self.graph),
            token: Arc::clone(&self.token),
            tool_router: self.tool_router.clone(),
        }
    }
}

impl<G: GraphApi + 'static> GraphMcp<G> {
    /// Create a server over `graph`, presenting `token` on every call.
    pub fn new(graph: impl Into<Arc<G>>, token: impl Into<Arc<str>>) -> Self {
        Self {
            graph: graph.into(),
            token: token.into(),
            tool_router: Self::planner_router() + Self::contacts_router() + Self::calendar_router(),
        }
    }

    pub(crate) fn graph(&self) -> &G {
        &self.graph
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }
}

#[tool_handler(router = self.tool_router)]
impl<G: GraphApi + 'static> ServerHandler for GraphMcp<G> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.instructions = Some(
            "Microsoft Graph tools: list and create Planner tasks, Outlook \
             contacts, and calendar events. Listing tools accept optional \
             filters; creation tools return the new resource's id."
                .to_string(),
        );
        info
    }
}
