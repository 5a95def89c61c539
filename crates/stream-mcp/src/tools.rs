//! MCP Tool Types
//!
//! Parameter types for the tools exposed by the server. Absent fields are
//! filled from the configured stream defaults by the server.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// =============================================================================
// Notification Stream Tool
// =============================================================================

/// Parameters for start-notification-stream
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct StartNotificationStreamParams {
    /// Interval in milliseconds between notifications (default: 100)
    #[serde(default)]
    pub interval: Option<u64>,

    /// Number of notifications to send (0 for unbounded, default: 10)
    #[serde(default)]
    pub count: Option<u64>,
}

/// Text returned once a notification stream ends.
///
/// Only the interval is echoed; delivery counts and cancellation are not
/// part of the result.
pub fn stream_started_message(interval_ms: u64) -> String {
    format!("Started sending periodic notifications every {interval_ms}ms")
}
