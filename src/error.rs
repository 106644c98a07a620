//! Error types for Graph operations.
//!
//! One error enum covers the whole client layer: configuration problems,
//! token acquisition, transport failures, and the status-mapped errors
//! Graph reports in its `{"error":{code,message}}` envelope. Uses miette
//! for diagnostic output and thiserror for the derive.

use miette::Diagnostic;
use thiserror::Error;

/// Errors from the Graph client layer.
#[derive(Error, Diagnostic, Debug)]
pub enum GraphError {
    #[error("Unauthorized: Graph rejected the access token")]
    #[diagnostic(
        code(graph_mcp::graph::unauthorized),
        help("The token may be expired or missing a required scope (Tasks.ReadWrite, Contacts.ReadWrite, Calendars.ReadWrite).")
    )]
    Unauthorized,

    #[error("Not found: {resource}")]
    #[diagnostic(code(graph_mcp::graph::not_found))]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    #[diagnostic(code(graph_mcp::graph::bad_request))]
    BadRequest { message: String },

    #[error("Graph API error ({status}): {message}")]
    #[diagnostic(code(graph_mcp::graph::api_error))]
    Api { status: u16, message: String },

    #[error("HTTP transport error: {0}")]
    #[diagnostic(
        code(graph_mcp::graph::transport),
        help("Is the network up and the Graph endpoint reachable?")
    )]
    Http(#[from] reqwest::Error),

    #[error("Token acquisition failed: {message}")]
    #[diagnostic(code(graph_mcp::auth::token))]
    Token { message: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(code(graph_mcp::config::invalid))]
    Config { message: String },
}

/// Result type for Graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_resource() {
        let err = GraphError::NotFound {
            resource: "planner task 'abc'".to_string(),
        };
        assert_eq!(err.to_string(), "Not found: planner task 'abc'");
    }

    #[test]
    fn api_error_carries_status() {
        let err = GraphError::Api {
            status: 503,
            message: "ServiceNotAvailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("ServiceNotAvailable"));
    }
}
