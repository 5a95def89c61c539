//! Stream types for periodic notification runs.

use std::time::Duration;

use chrono::{DateTime, SecondsFormat, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default spacing between notifications, in milliseconds.
pub const DEFAULT_INTERVAL_MS: u64 = 100;

/// Default number of notifications per run.
pub const DEFAULT_COUNT: u64 = 10;

/// Unique identifier for one emitter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    /// Create a new random run ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for RunId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input to one emitter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StreamRequest {
    /// Milliseconds between successive notifications (0 = no timed wait)
    pub interval_ms: u64,
    /// Number of notifications to send (0 = unbounded)
    pub count: u64,
}

impl StreamRequest {
    /// Create a new stream request.
    pub fn new(interval_ms: u64, count: u64) -> Self {
        Self { interval_ms, count }
    }

    /// Request that runs until cancelled.
    pub fn unbounded(interval_ms: u64) -> Self {
        Self::new(interval_ms, 0)
    }

    /// Spacing between notifications.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Whether the run only ends on cancellation.
    pub fn is_unbounded(&self) -> bool {
        self.count == 0
    }

    /// Whether a run that has sent `counter` notifications is finished.
    pub fn is_complete(&self, counter: u64) -> bool {
        !self.is_unbounded() && counter >= self.count
    }
}

impl Default for StreamRequest {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL_MS, DEFAULT_COUNT)
    }
}

/// One notification emitted by a run.
///
/// Built right before its delivery attempt and dropped once that attempt
/// resolves; nothing keeps a history of sent messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// 1-based ordinal within the run
    pub sequence_number: u64,
    /// Moment the message was built for sending
    pub timestamp: DateTime<Utc>,
    /// Severity marker, always [`NotificationMessage::LEVEL`]
    pub level: String,
    /// Human-readable text carrying the sequence number and timestamp
    pub payload: String,
}

impl NotificationMessage {
    /// Severity used for every periodic notification.
    pub const LEVEL: &'static str = "info";

    /// Build a message stamped with the current time.
    pub fn now(sequence_number: u64) -> Self {
        Self::at(sequence_number, Utc::now())
    }

    /// Build a message with an explicit timestamp.
    pub fn at(sequence_number: u64, timestamp: DateTime<Utc>) -> Self {
        let stamp = format_timestamp(&timestamp);
        Self {
            sequence_number,
            timestamp,
            level: Self::LEVEL.to_string(),
            payload: format!("Periodic notification #{sequence_number} at {stamp}"),
        }
    }

    /// Timestamp as RFC 3339 UTC with millisecond precision.
    pub fn timestamp_text(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// A delivery attempt that did not reach the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryFailure {
    /// Run that produced the message
    pub run_id: RunId,
    /// Sequence number of the failed message
    pub sequence_number: u64,
    /// Error reported by the session channel
    pub error: String,
}

/// Outcome of one emitter run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunSummary {
    /// Run identifier
    pub run_id: RunId,
    /// Notifications delivered successfully
    pub sent: u64,
    /// Notifications whose delivery failed
    pub failed: u64,
    /// Whether the run ended because of cancellation
    pub cancelled: bool,
}

impl RunSummary {
    /// Total delivery attempts made.
    pub fn attempted(&self) -> u64 {
        self.sent + self.failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_request() {
        let request = StreamRequest::default();
        assert_eq!(request.interval_ms, 100);
        assert_eq!(request.count, 10);
        assert!(!request.is_unbounded());
    }

    #[test]
    fn test_unbounded_request_never_completes() {
        let request = StreamRequest::unbounded(0);
        assert!(request.is_unbounded());
        assert!(!request.is_complete(0));
        assert!(!request.is_complete(u64::MAX));
    }

    #[test]
    fn test_bounded_request_completion() {
        let request = StreamRequest::new(50, 3);
        assert!(!request.is_complete(2));
        assert!(request.is_complete(3));
        assert_eq!(request.interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_message_payload_format() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 1, 12, 30, 5).unwrap();
        let message = NotificationMessage::at(7, ts);
        assert_eq!(message.sequence_number, 7);
        assert_eq!(message.level, "info");
        assert_eq!(message.timestamp_text(), "2025-03-01T12:30:05.000Z");
        assert_eq!(
            message.payload,
            "Periodic notification #7 at 2025-03-01T12:30:05.000Z"
        );
    }

    #[test]
    fn test_timestamps_sort_as_text() {
        let earlier =
            NotificationMessage::at(1, Utc.with_ymd_and_hms(2025, 1, 9, 23, 59, 59).unwrap());
        let later =
            NotificationMessage::at(2, Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap());
        assert!(earlier.timestamp_text() < later.timestamp_text());
    }

    #[test]
    fn test_run_summary_attempted() {
        let summary = RunSummary {
            run_id: RunId::new(),
            sent: 3,
            failed: 1,
            cancelled: false,
        };
        assert_eq!(summary.attempted(), 4);
    }

    #[test]
    fn test_run_id_display_is_uuid() {
        let id = RunId::new();
        assert!(Uuid::parse_str(&id.to_string()).is_ok());
    }
}
