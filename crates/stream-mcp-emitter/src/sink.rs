//! Delivery seam between the emitter and a live session.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use stream_mcp_core::{DeliveryFailure, Error, NotificationMessage, Result};

/// Destination for the notifications of one run.
///
/// Each call resolves once the message has been handed to the session or
/// the attempt has failed. The emitter never calls `deliver` concurrently
/// for the same run.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one message to the session.
    async fn deliver(&self, message: &NotificationMessage) -> Result<()>;
}

#[async_trait]
impl<T: NotificationSink + ?Sized> NotificationSink for Arc<T> {
    async fn deliver(&self, message: &NotificationMessage) -> Result<()> {
        (**self).deliver(message).await
    }
}

/// Sink that forwards messages into a bounded tokio channel.
///
/// Delivery fails with [`Error::ChannelClosed`] once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::Sender<NotificationMessage>,
}

impl ChannelSink {
    /// Create a sink and the receiver that observes its messages.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<NotificationMessage>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }
}

#[async_trait]
impl NotificationSink for ChannelSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<()> {
        self.tx
            .send(message.clone())
            .await
            .map_err(|_| Error::ChannelClosed)
    }
}

/// Observer for delivery attempts that did not reach the session.
///
/// Called synchronously from the emitter loop, so implementations must not
/// block.
pub trait FailureHook: Send + Sync {
    /// Record one failed delivery.
    fn on_failure(&self, failure: &DeliveryFailure);
}

/// Failure hook that forwards every failure into an unbounded channel.
#[derive(Debug, Clone)]
pub struct FailureChannel {
    tx: mpsc::UnboundedSender<DeliveryFailure>,
}

impl FailureChannel {
    /// Create a hook and the receiver that collects its failures.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DeliveryFailure>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl FailureHook for FailureChannel {
    fn on_failure(&self, failure: &DeliveryFailure) {
        // Nobody listening anymore; the emitter has already logged it
        let _ = self.tx.send(failure.clone());
    }
}
