//! MCP Protocol Layer
//!
//! This module implements the Model Context Protocol server using rmcp 0.9.
//! It exposes the greeting prompt, the static document and the notification
//! stream tool.

pub mod server;

pub use server::StreamMcpServer;
