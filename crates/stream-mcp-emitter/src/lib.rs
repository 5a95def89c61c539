//! # stream-mcp-emitter
//!
//! Periodic notification delivery for the Stream MCP Server.
//!
//! This crate provides:
//! - The [`NotificationSink`] seam a run delivers messages through
//! - Failure hooks that observe individual delivery failures
//! - The [`NotificationEmitter`] pacing loop and its spawned form
//!
//! ## Architecture
//!
//! This is Layer 1 in the architecture - it depends on stream-mcp-core and
//! knows nothing about the MCP transport. The server crate adapts its
//! session peer into a [`NotificationSink`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod emitter;
pub mod sink;

// Re-export commonly used types
pub use emitter::{NotificationEmitter, StreamHandle};
pub use sink::{ChannelSink, FailureChannel, FailureHook, NotificationSink};

// Cancellation primitive used by every run
pub use tokio_util::sync::CancellationToken;
