//! MCP Streamable HTTP service creation.
//!
//! Produces a `StreamableHttpService` that can be nested into an axum
//! router (the `graph-mcp` binary mounts it at `/mcp`).

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::graph::GraphApi;

use super::server::GraphMcp;

/// Create the MCP Streamable HTTP service.
///
/// A fresh `GraphMcp` is built per session from the shared Graph client and
/// the startup credential.
pub fn create_mcp_service<G: GraphApi + 'static>(
    graph: impl Into<Arc<G>>,
    token: impl Into<Arc<str>>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<GraphMcp<G>, LocalSessionManager> {
    let graph = graph.into();
    let token: Arc<str> = token.into();

    // Service factory: one GraphMcp per session. Returns io::Error to match
    // rmcp's expected signature.
    let service_factory = move || -> Result<GraphMcp<G>, std::io::Error> {
        Ok(GraphMcp::new(Arc::clone(&graph), Arc::clone(&token)))
    };

    let mut config = StreamableHttpServerConfig::default();
    config.sse_keep_alive = None; // use default (15s)
    config.sse_retry = None;
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
