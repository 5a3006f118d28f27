// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Connectivity-triggered resynchronization of the unsent queue.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vita_core::{ChatStorage, ConnectivityState, VitaError};

use crate::dispatch::Dispatcher;

/// Result of one synchronization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Not online; nothing was attempted.
    Offline,
    /// The queue was already empty.
    Empty,
    /// The queue was drained and then cleared.
    Drained {
        /// How many messages were queued when the pass started.
        queued: usize,
        /// How many were delivered before the pass ended.
        delivered: usize,
        /// Whether the pass stopped early on a failed delivery.
        aborted: bool,
    },
}

/// Flushes the unsent queue through the dispatcher when online.
pub struct Synchronizer {
    storage: Arc<dyn ChatStorage>,
    dispatcher: Arc<Dispatcher>,
    connectivity: ConnectivityState,
}

impl Synchronizer {
    /// Creates a synchronizer over the given storage, dispatcher, and signal.
    pub fn new(
        storage: Arc<dyn ChatStorage>,
        dispatcher: Arc<Dispatcher>,
        connectivity: ConnectivityState,
    ) -> Self {
        Self {
            storage,
            dispatcher,
            connectivity,
        }
    }

    /// Runs one synchronization pass.
    ///
    /// Queued messages are delivered strictly in insertion order, one at a
    /// time; the first failure stops the pass. The queue is then cleared
    /// wholesale no matter how far the pass got — messages at and after a
    /// failure point are dropped, not kept for retry. That lossy clear is
    /// long-standing behavior callers rely on being able to observe.
    pub async fn sync_once(&self) -> Result<SyncOutcome, VitaError> {
        if !self.connectivity.is_online() {
            return Ok(SyncOutcome::Offline);
        }

        let queued = self.storage.list_unsent().await?;
        if queued.is_empty() {
            return Ok(SyncOutcome::Empty);
        }

        info!(count = queued.len(), "draining unsent queue");

        let mut delivered = 0usize;
        let mut aborted = false;
        for message in &queued {
            match self.dispatcher.deliver(&message.text).await {
                Ok(_) => delivered += 1,
                Err(e) => {
                    warn!(
                        error = %e,
                        id = message.id,
                        "delivery failed mid-drain, abandoning the rest of the queue"
                    );
                    aborted = true;
                    break;
                }
            }
        }

        self.storage.clear_unsent().await?;

        Ok(SyncOutcome::Drained {
            queued: queued.len(),
            delivered,
            aborted,
        })
    }

    /// Runs until cancelled: one pass at startup, then one pass per
    /// became-online transition.
    pub async fn run(&self, cancel: CancellationToken) {
        match self.sync_once().await {
            Ok(outcome) => debug!(?outcome, "startup sync complete"),
            Err(e) => warn!(error = %e, "startup sync failed"),
        }

        let mut events = self.connectivity.subscribe();
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("synchronizer stopped");
                    break;
                }
                changed = events.became_online() => {
                    if changed.is_err() {
                        break;
                    }
                    match self.sync_once().await {
                        Ok(outcome) => debug!(?outcome, "sync pass complete"),
                        Err(e) => warn!(error = %e, "sync pass failed"),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ModelSelection;
    use vita_core::Sender;
    use vita_test_utils::{MemoryStorage, MockCompleter};

    fn synchronizer_with(
        mock: Arc<MockCompleter>,
        storage: Arc<MemoryStorage>,
        connectivity: ConnectivityState,
    ) -> Synchronizer {
        let dispatcher = Arc::new(Dispatcher::new(
            mock,
            storage.clone(),
            ModelSelection::new("gpt-4o"),
        ));
        Synchronizer::new(storage, dispatcher, connectivity)
    }

    async fn queue_messages(storage: &MemoryStorage, texts: &[&str]) {
        for text in texts {
            storage
                .enqueue_unsent(&vita_core::ChatEntry::user(*text))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn offline_pass_is_a_no_op() {
        let mock = Arc::new(MockCompleter::new());
        let storage = Arc::new(MemoryStorage::new());
        queue_messages(&storage, &["held"]).await;

        let sync = synchronizer_with(mock.clone(), storage.clone(), ConnectivityState::new(false));
        assert_eq!(sync.sync_once().await.unwrap(), SyncOutcome::Offline);

        // Nothing sent, nothing cleared.
        assert!(mock.requests().await.is_empty());
        assert_eq!(storage.list_unsent().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn successful_drain_empties_queue_and_logs_replies() {
        let mock = Arc::new(MockCompleter::with_replies(vec!["r1", "r2"]));
        let storage = Arc::new(MemoryStorage::new());
        queue_messages(&storage, &["a", "b"]).await;

        let sync = synchronizer_with(mock.clone(), storage.clone(), ConnectivityState::new(true));
        let outcome = sync.sync_once().await.unwrap();
        assert_eq!(
            outcome,
            SyncOutcome::Drained {
                queued: 2,
                delivered: 2,
                aborted: false
            }
        );

        assert!(storage.list_unsent().await.unwrap().is_empty());

        // Delivered in insertion order.
        let requests = mock.requests().await;
        assert_eq!(
            requests.iter().map(|r| r.user_text.as_str()).collect::<Vec<_>>(),
            vec!["a", "b"]
        );

        // Replies landed in the log.
        let log = storage.log_snapshot().await;
        assert_eq!(
            log.iter().map(|e| e.text.as_str()).collect::<Vec<_>>(),
            vec!["r1", "r2"]
        );
        assert!(log.iter().all(|e| e.sender == Sender::Assistant));
    }

    #[tokio::test]
    async fn second_drain_after_success_is_a_no_op() {
        let mock = Arc::new(MockCompleter::with_replies(vec!["ok"]));
        let storage = Arc::new(MemoryStorage::new());
        queue_messages(&storage, &["once"]).await;

        let sync = synchronizer_with(mock.clone(), storage.clone(), ConnectivityState::new(true));
        sync.sync_once().await.unwrap();
        assert_eq!(sync.sync_once().await.unwrap(), SyncOutcome::Empty);
        assert_eq!(mock.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn failed_delivery_clears_the_rest_of_the_queue() {
        // Queue [A, B, C] with B failing: the drain stops at B, yet the
        // whole queue is cleared — B and C are gone without ever being
        // delivered. This asserts the documented lossy behavior; do not
        // "fix" it to per-item removal.
        let mock = Arc::new(MockCompleter::new());
        mock.push_reply("delivered A").await;
        mock.push_failure("B hit a dead link").await;
        let storage = Arc::new(MemoryStorage::new());
        queue_messages(&storage, &["A", "B", "C"]).await;

        let sync = synchronizer_with(mock.clone(), storage.clone(), ConnectivityState::new(true));
        let outcome = sync.sync_once().await.unwrap();
        assert_eq!(
            outcome,
            SyncOutcome::Drained {
                queued: 3,
                delivered: 1,
                aborted: true
            }
        );

        // The queue is empty even though B and C were never delivered.
        assert!(storage.list_unsent().await.unwrap().is_empty());

        // C was never attempted.
        let requests = mock.requests().await;
        assert_eq!(
            requests.iter().map(|r| r.user_text.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[tokio::test]
    async fn run_drains_on_became_online_and_stops_on_cancel() {
        let mock = Arc::new(MockCompleter::with_replies(vec!["ok"]));
        let storage = Arc::new(MemoryStorage::new());
        let connectivity = ConnectivityState::new(false);
        queue_messages(&storage, &["deferred"]).await;

        let sync = Arc::new(synchronizer_with(
            mock.clone(),
            storage.clone(),
            connectivity.clone(),
        ));
        let cancel = CancellationToken::new();
        let task = tokio::spawn({
            let sync = sync.clone();
            let cancel = cancel.clone();
            async move { sync.run(cancel).await }
        });

        // Startup pass was offline; the queue still holds the message.
        tokio::task::yield_now().await;
        assert_eq!(storage.list_unsent().await.unwrap().len(), 1);

        connectivity.set_online(true);
        // Wait for the drain triggered by the online edge.
        for _ in 0..50 {
            if storage.list_unsent().await.unwrap().is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert!(storage.list_unsent().await.unwrap().is_empty());

        cancel.cancel();
        task.await.unwrap();
    }
}
