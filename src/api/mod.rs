//! HTTP API server with event broadcasting.
//!
//! The broadcasting variant: a small Planner proxy surface plus a
//! Server-Sent-Events stream at `/events` that fans task-change
//! notifications out to every connected subscriber.
//!
//! # Architecture
//!
//! - `state`: shared `AppState` (Graph client + broadcaster)
//! - `auth`: bearer-token middleware; callers supply the Graph credential
//! - `routes`: router assembly, permissive CORS, JSON 404 fallback
//! - `sse`: the `/events` stream handler
//! - `handlers`: the Planner proxy endpoints

pub mod auth;
pub mod handlers;
pub mod routes;
pub mod sse;
pub mod state;

#[cfg(test)]
mod routes_test;

pub use state::AppState;

use std::net::IpAddr;

use miette::Diagnostic;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::graph::GraphApi;

/// API server configuration.
pub struct Config {
    /// Host address to bind to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".parse().unwrap(),
            port: 3000,
        }
    }
}

/// Errors from running the API server.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    #[error("Server I/O error: {0}")]
    #[diagnostic(code(graph_mcp::api::io))]
    Io(#[from] std::io::Error),
}

/// Initialize tracing subscriber with env filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "graph_mcp=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Run the API server with the given configuration and state.
pub async fn run<G: GraphApi + 'static>(config: Config, state: AppState<G>) -> Result<(), ApiError> {
    init_tracing();

    let app = routes::create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("API server listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
