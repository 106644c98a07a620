//! Microsoft Graph tool servers for LLM clients.
//!
//! This crate exposes Graph resources (Planner tasks, Outlook contacts,
//! calendar events) two ways:
//!
//! - `mcp`: an MCP server whose tools validate input with JSON schemas,
//!   call the Graph REST API, and return markdown summaries.
//! - `api`: an HTTP variant that proxies a small Planner surface and fans
//!   task-change events out to Server-Sent-Events subscribers.
//!
//! The `graph` module is the shared client layer; `events` is the
//! broadcaster the HTTP variant publishes through.

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod graph;
pub mod mcp;
