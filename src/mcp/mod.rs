//! Model Context Protocol (MCP) server implementation.
//!
//! The server exposes Microsoft Graph tools over the Streamable HTTP
//! transport.
//!
//! # Architecture
//!
//! - `server`: the `GraphMcp` coordinator holding the combined tool router
//! - `service`: Streamable HTTP service factory for nesting into axum
//! - `format`: markdown rendering of Graph resources for tool output
//! - `tools`: tool impl blocks, one module per Graph entity
//!   (planner / contacts / calendar)
//!
//! Everything is generic over `G: GraphApi`, so tests run the tools against
//! a stub Graph instead of the live service.

pub mod format;
pub mod server;
mod service;
pub mod tools;


pub use server::GraphMcp;
pub use service::create_mcp_service;
