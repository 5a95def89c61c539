//! # Stream MCP Server
//!
//! Stateless Model Context Protocol server used to exercise notification
//! delivery and resumability in MCP clients.
//!
//! ## Overview
//!
//! This server provides:
//! - A `greeting-template` prompt
//! - A static text document resource
//! - The `start-notification-stream` tool, which pushes numbered
//!   `notifications/message` events at a fixed interval
//!
//! ## Architecture
//!
//! This is Layer 2 - the MCP server binary that ties together:
//! - stream-mcp-core: Core types and configuration
//! - stream-mcp-emitter: Paced notification delivery

use clap::Parser;
use rmcp::{transport::stdio, ServiceExt};
use stream_mcp::{Cli, StreamMcpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    // Initialize logging on stderr; stdout carries the protocol
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.server.log_level)),
        )
        .init();

    tracing::info!(
        "{} v{} starting...",
        config.server.name,
        env!("CARGO_PKG_VERSION")
    );

    let server = StreamMcpServer::from_config(&config);

    tracing::info!("Server initialized, starting stdio transport...");

    let service = server.serve(stdio()).await.map_err(|e| {
        tracing::error!("Error starting server: {}", e);
        e
    })?;

    tracing::info!("{} running on stdio", config.server.name);

    service.waiting().await?;

    tracing::info!("{} shutting down", config.server.name);

    Ok(())
}
