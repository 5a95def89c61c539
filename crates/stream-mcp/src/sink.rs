//! Session sink backed by the connected MCP client.

use async_trait::async_trait;
use rmcp::{
    model::{LoggingLevel, LoggingMessageNotificationParam},
    Peer, RoleServer,
};

use stream_mcp_core::{Error, NotificationMessage, Result};
use stream_mcp_emitter::NotificationSink;

/// Delivers notifications as `notifications/message` to one client peer.
#[derive(Clone)]
pub struct PeerSink {
    peer: Peer<RoleServer>,
}

impl PeerSink {
    /// Wrap the peer of the invoking request.
    pub fn new(peer: Peer<RoleServer>) -> Self {
        Self { peer }
    }
}

/// Build the wire parameters for one notification.
pub fn logging_param(message: &NotificationMessage) -> LoggingMessageNotificationParam {
    LoggingMessageNotificationParam {
        level: LoggingLevel::Info,
        logger: None,
        data: serde_json::Value::String(message.payload.clone()),
    }
}

#[async_trait]
impl NotificationSink for PeerSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<()> {
        self.peer
            .notify_logging_message(logging_param(message))
            .await
            .map_err(|e| Error::Delivery(e.to_string()))
    }
}
