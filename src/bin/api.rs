//! Broadcasting HTTP server binary.
//!
//! Serves the Planner proxy surface plus the `/events` stream. This variant
//! holds no Graph credential of its own: every caller supplies a bearer
//! token, which the handlers forward upstream.

use std::net::IpAddr;

use clap::Parser;
use graph_mcp::api::{self, ApiError, AppState, Config};
use graph_mcp::config::DEFAULT_BASE_URL;
use graph_mcp::events::EventBroadcaster;
use graph_mcp::graph::GraphClient;
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("API server error: {0}")]
    #[diagnostic(code(graph_mcp::binary::api))]
    Api(#[from] ApiError),
}

#[derive(Parser)]
#[command(name = "graph-mcp-api")]
#[command(author, version, about = "Planner proxy with SSE event broadcasting", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Microsoft Graph endpoint
    #[arg(long, env = "GRAPH_BASE_URL", default_value = DEFAULT_BASE_URL)]
    graph_url: String,
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    let cli = Cli::parse();

    let graph = GraphClient::new(cli.graph_url);
    let state = AppState::new(graph, EventBroadcaster::new());

    api::run(
        Config {
            host: cli.host,
            port: cli.port,
        },
        state,
    )
    .await?;

    Ok(())
}
