// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic motivational reminders.
//!
//! The [`ReminderRunner`] appends a motivational entry to the conversation
//! log on a configurable interval, rotating through the configured
//! messages. It only runs in long-lived modes; one-shot commands never
//! start it.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vita_config::model::ReminderConfig;
use vita_core::{ChatEntry, ChatStorage, VitaError};

/// Appends rotating motivational entries to the log on an interval.
pub struct ReminderRunner {
    config: ReminderConfig,
    storage: Arc<dyn ChatStorage>,
    /// Index of the next message in the rotation.
    next_index: Mutex<usize>,
}

impl ReminderRunner {
    /// Creates a runner from configuration and the shared storage.
    pub fn new(config: ReminderConfig, storage: Arc<dyn ChatStorage>) -> Self {
        Self {
            config,
            storage,
            next_index: Mutex::new(0),
        }
    }

    /// Appends the next reminder in rotation.
    ///
    /// Returns `Ok(None)` when reminders are disabled or no messages are
    /// configured.
    pub async fn execute(&self) -> Result<Option<String>, VitaError> {
        if !self.config.enabled || self.config.messages.is_empty() {
            return Ok(None);
        }

        let message = {
            let mut index = self.next_index.lock().await;
            let message = self.config.messages[*index % self.config.messages.len()].clone();
            *index += 1;
            message
        };

        self.storage
            .append_entry(&ChatEntry::assistant(&message))
            .await?;
        debug!(message = message.as_str(), "reminder appended");

        Ok(Some(message))
    }

    /// Runs until cancelled, firing once per interval.
    ///
    /// The first reminder lands one full interval after start, not
    /// immediately.
    pub async fn run(&self, cancel: CancellationToken) {
        if !self.config.enabled {
            debug!("reminders disabled");
            return;
        }

        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.interval_secs));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // interval() fires immediately; swallow that first tick.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("reminder runner stopped");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.execute().await {
                        warn!(error = %e, "failed to append reminder");
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::Sender;
    use vita_test_utils::MemoryStorage;

    fn config(enabled: bool, messages: &[&str]) -> ReminderConfig {
        ReminderConfig {
            enabled,
            interval_secs: 60,
            messages: messages.iter().map(|m| m.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn execute_rotates_through_messages() {
        let storage = Arc::new(MemoryStorage::new());
        let runner = ReminderRunner::new(config(true, &["move", "hydrate"]), storage.clone());

        assert_eq!(runner.execute().await.unwrap().as_deref(), Some("move"));
        assert_eq!(runner.execute().await.unwrap().as_deref(), Some("hydrate"));
        assert_eq!(runner.execute().await.unwrap().as_deref(), Some("move"));

        let log = storage.log_snapshot().await;
        assert_eq!(log.len(), 3);
        assert!(log.iter().all(|e| e.sender == Sender::Assistant));
    }

    #[tokio::test]
    async fn execute_is_a_no_op_when_disabled() {
        let storage = Arc::new(MemoryStorage::new());
        let runner = ReminderRunner::new(config(false, &["move"]), storage.clone());

        assert!(runner.execute().await.unwrap().is_none());
        assert!(storage.log_snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn execute_is_a_no_op_with_no_messages() {
        let storage = Arc::new(MemoryStorage::new());
        let runner = ReminderRunner::new(config(true, &[]), storage.clone());
        assert!(runner.execute().await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn run_fires_once_per_interval() {
        let storage = Arc::new(MemoryStorage::new());
        let runner = Arc::new(ReminderRunner::new(
            config(true, &["tick"]),
            storage.clone(),
        ));
        let cancel = CancellationToken::new();

        let task = tokio::spawn({
            let runner = runner.clone();
            let cancel = cancel.clone();
            async move { runner.run(cancel).await }
        });

        // Nothing fires before the first interval elapses.
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(storage.log_snapshot().await.is_empty());

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(storage.log_snapshot().await.len(), 1);

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(storage.log_snapshot().await.len(), 2);

        cancel.cancel();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn run_exits_immediately_when_disabled() {
        let storage = Arc::new(MemoryStorage::new());
        let runner = ReminderRunner::new(config(false, &["never"]), storage);
        // Completes without waiting on the interval.
        runner.run(CancellationToken::new()).await;
    }
}
