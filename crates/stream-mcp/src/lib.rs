//! Stream MCP Server Library
//!
//! This library contains the MCP protocol layer types and handlers.
//! The actual server binary is in main.rs.

pub mod cli;
pub mod prompts;
pub mod protocol;
pub mod resources;
pub mod sink;
pub mod tools;

// Re-export commonly used types
pub use cli::Cli;
pub use prompts::{PromptDefinition, PromptRegistry};
pub use protocol::StreamMcpServer;
pub use resources::{ResourceRegistry, StaticResource};
pub use sink::PeerSink;
pub use tools::*;
