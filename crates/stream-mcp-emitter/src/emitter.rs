//! Paced notification loop.
//!
//! A run sends numbered notifications one at a time, waits `interval`
//! between attempts and stops after `count` attempts, or only on
//! cancellation when `count` is 0. A failed delivery is logged, handed to
//! the failure hook and skipped; it never ends the run.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, instrument, warn};

use stream_mcp_core::{
    DeliveryFailure, Error, NotificationMessage, Result, RunId, RunSummary, StreamRequest,
};

use crate::sink::{FailureHook, NotificationSink};

/// Drives one periodic notification run.
#[derive(Clone)]
pub struct NotificationEmitter {
    request: StreamRequest,
    failure_hook: Option<Arc<dyn FailureHook>>,
}

impl NotificationEmitter {
    /// Create an emitter for the given request.
    pub fn new(request: StreamRequest) -> Self {
        Self {
            request,
            failure_hook: None,
        }
    }

    /// Report failed deliveries to `hook` in addition to the log.
    pub fn with_failure_hook(mut self, hook: Arc<dyn FailureHook>) -> Self {
        self.failure_hook = Some(hook);
        self
    }

    /// The request this emitter runs.
    pub fn request(&self) -> &StreamRequest {
        &self.request
    }

    /// Run the loop to completion on the current task.
    ///
    /// Returns when `count` notifications have been attempted or when
    /// `cancel` fires. Cancellation is checked before each delivery and
    /// raced against each wait, but a delivery already in progress is
    /// always allowed to finish.
    #[instrument(skip_all, fields(interval_ms = self.request.interval_ms, count = self.request.count))]
    pub async fn run<S>(&self, sink: &S, cancel: &CancellationToken) -> RunSummary
    where
        S: NotificationSink + ?Sized,
    {
        let run_id = RunId::new();
        let mut counter: u64 = 0;
        let mut sent: u64 = 0;
        let mut failed: u64 = 0;

        debug!(%run_id, "Starting notification run");

        let cancelled = loop {
            if cancel.is_cancelled() {
                break true;
            }

            counter += 1;
            let message = NotificationMessage::now(counter);

            match sink.deliver(&message).await {
                Ok(()) => {
                    sent += 1;
                    debug!(%run_id, sequence = counter, "Notification delivered");
                }
                Err(e) => {
                    failed += 1;
                    warn!(%run_id, sequence = counter, "Error sending notification: {}", e);
                    self.report_failure(run_id, counter, &e);
                }
            }

            if !self.pause(cancel).await {
                break true;
            }

            if self.request.is_complete(counter) {
                break false;
            }
        };

        let summary = RunSummary {
            run_id,
            sent,
            failed,
            cancelled,
        };

        info!(
            %run_id,
            sent = summary.sent,
            failed = summary.failed,
            cancelled = summary.cancelled,
            "Notification run finished"
        );

        summary
    }

    /// Run the loop on its own task.
    ///
    /// The returned handle owns `cancel`: cancelling the handle or dropping
    /// it stops the run at its next wait boundary.
    pub fn spawn(
        self,
        sink: Arc<dyn NotificationSink>,
        cancel: CancellationToken,
    ) -> StreamHandle {
        let task_cancel = cancel.clone();
        let join = tokio::spawn(async move { self.run(sink.as_ref(), &task_cancel).await });

        StreamHandle {
            guard: cancel.clone().drop_guard(),
            cancel,
            join,
        }
    }

    /// Wait out the interval. Returns false if cancellation was observed.
    async fn pause(&self, cancel: &CancellationToken) -> bool {
        if self.request.interval_ms == 0 {
            // Keep the run observable to cancellation even without a timer
            tokio::task::yield_now().await;
            return !cancel.is_cancelled();
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.request.interval()) => true,
        }
    }

    fn report_failure(&self, run_id: RunId, sequence_number: u64, error: &Error) {
        if let Some(hook) = &self.failure_hook {
            hook.on_failure(&DeliveryFailure {
                run_id,
                sequence_number,
                error: error.to_string(),
            });
        }
    }
}

impl std::fmt::Debug for NotificationEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationEmitter")
            .field("request", &self.request)
            .field("failure_hook", &self.failure_hook.is_some())
            .finish()
    }
}

/// Handle to a spawned run.
pub struct StreamHandle {
    cancel: CancellationToken,
    join: JoinHandle<RunSummary>,
    guard: DropGuard,
}

impl StreamHandle {
    /// Ask the run to stop at its next wait boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Token the run observes.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Whether the run's task has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the run to end and return its summary.
    pub async fn join(self) -> Result<RunSummary> {
        let StreamHandle { join, guard, .. } = self;
        let summary = join
            .await
            .map_err(|e| Error::Other(format!("Notification task failed: {e}")))?;
        drop(guard);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{ChannelSink, FailureChannel};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_bounded_run_sends_exactly_count() {
        let (sink, mut rx) = ChannelSink::new(16);
        let emitter = NotificationEmitter::new(StreamRequest::new(10, 4));

        let summary = emitter.run(&sink, &CancellationToken::new()).await;

        assert_eq!(summary.sent, 4);
        assert_eq!(summary.failed, 0);
        assert!(!summary.cancelled);

        let mut seen = Vec::new();
        while let Ok(message) = rx.try_recv() {
            seen.push(message.sequence_number);
        }
        assert_eq!(seen, vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_already_cancelled_sends_nothing() {
        let (sink, mut rx) = ChannelSink::new(4);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let summary = NotificationEmitter::new(StreamRequest::new(0, 3))
            .run(&sink, &cancel)
            .await;

        assert_eq!(summary.attempted(), 0);
        assert!(summary.cancelled);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_channel_does_not_stop_run() {
        let (sink, rx) = ChannelSink::new(1);
        drop(rx);
        let (hook, mut failures) = FailureChannel::new();

        let summary = NotificationEmitter::new(StreamRequest::new(5, 3))
            .with_failure_hook(Arc::new(hook))
            .run(&sink, &CancellationToken::new())
            .await;

        assert_eq!(summary.sent, 0);
        assert_eq!(summary.failed, 3);
        assert!(!summary.cancelled);

        let mut sequences = Vec::new();
        while let Ok(failure) = failures.try_recv() {
            assert_eq!(failure.error, "Session channel closed");
            assert_eq!(failure.run_id, summary.run_id);
            sequences.push(failure.sequence_number);
        }
        assert_eq!(sequences, vec![1, 2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_wait_returns_early() {
        let (sink, mut rx) = ChannelSink::new(16);
        let emitter = NotificationEmitter::new(StreamRequest::new(1_000, 5));
        let handle = emitter.spawn(Arc::new(sink), CancellationToken::new());

        // First message goes out immediately, then the run waits 1s
        let first = rx.recv().await.unwrap();
        assert_eq!(first.sequence_number, 1);

        tokio::time::sleep(Duration::from_millis(300)).await;
        handle.cancel();

        let summary = handle.join().await.unwrap();
        assert_eq!(summary.sent, 1);
        assert!(summary.cancelled);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_dropping_handle_cancels_run() {
        let (sink, mut rx) = ChannelSink::new(1024);
        let cancel = CancellationToken::new();
        let handle = NotificationEmitter::new(StreamRequest::unbounded(0))
            .spawn(Arc::new(sink), cancel.clone());

        rx.recv().await.unwrap();
        drop(handle);

        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_debug_hides_hook() {
        let (hook, _rx) = FailureChannel::new();
        let emitter =
            NotificationEmitter::new(StreamRequest::default()).with_failure_hook(Arc::new(hook));
        let debug = format!("{emitter:?}");
        assert!(debug.contains("failure_hook: true"));
        assert!(debug.contains("interval_ms: 100"));
    }
}
