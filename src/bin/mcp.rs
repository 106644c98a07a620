//! MCP server binary.
//!
//! Acquires a Graph credential once at startup, then serves the MCP
//! Streamable HTTP transport at `/mcp`.

use std::net::IpAddr;

use axum::Router;
use clap::Parser;
use graph_mcp::config::GraphConfig;
use graph_mcp::error::GraphError;
use graph_mcp::graph::{GraphClient, acquire_token};
use graph_mcp::mcp::create_mcp_service;
use miette::Diagnostic;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Error, Diagnostic, Debug)]
enum BinaryError {
    #[error("Graph error: {0}")]
    #[diagnostic(code(graph_mcp::binary::graph))]
    Graph(#[from] GraphError),

    #[error("Server I/O error: {0}")]
    #[diagnostic(code(graph_mcp::binary::io))]
    Io(#[from] std::io::Error),
}

#[derive(Parser)]
#[command(name = "graph-mcp")]
#[command(author, version, about = "Microsoft Graph MCP server", long_about = None)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, default_value = "3001")]
    port: u16,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graph_mcp=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<(), BinaryError> {
    init_tracing();
    let cli = Cli::parse();

    // Credential is resolved once here and read-only afterwards.
    let config = GraphConfig::from_env()?;
    let token = acquire_token(&config).await?;
    let graph = GraphClient::from_config(&config);

    let ct = CancellationToken::new();
    let mcp_service = create_mcp_service(graph, token, ct.clone());
    let app = Router::new().nest_service("/mcp", mcp_service);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("MCP server listening on http://{}/mcp", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            ct.cancel();
        })
        .await?;

    Ok(())
}
