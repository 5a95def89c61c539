//! # stream-mcp-core
//!
//! Core types for the Stream MCP Server.
//!
//! This crate contains all fundamental types with **no internal dependencies**
//! on other stream-mcp crates. It provides:
//!
//! - Stream types (StreamRequest, NotificationMessage, RunSummary)
//! - Run identifiers for correlating log output of concurrent runs
//! - Server configuration loaded from YAML
//! - Error types
//!
//! ## Architecture
//!
//! This is Layer 0 in the architecture - all other crates depend on this one,
//! but this crate has no dependencies on other stream-mcp crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod stream;

// Re-export commonly used types
pub use config::{ResourceSettings, ServerConfig, ServerSettings, StreamSettings};
pub use error::{Error, Result};
pub use stream::{
    DeliveryFailure, NotificationMessage, RunId, RunSummary, StreamRequest,
    DEFAULT_COUNT, DEFAULT_INTERVAL_MS,
};
