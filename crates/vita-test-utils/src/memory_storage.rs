// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `ChatStorage` fake for unit tests.

use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use vita_core::{ChatEntry, ChatStorage, QueuedMessage, VitaError};

/// Volatile storage with the same contract as the SQLite backend.
///
/// A failure toggle lets tests exercise the swallowed-error paths.
pub struct MemoryStorage {
    log: Mutex<Vec<ChatEntry>>,
    queue: Mutex<Vec<QueuedMessage>>,
    next_id: AtomicI64,
    fail_enqueue: AtomicBool,
}

impl MemoryStorage {
    /// Creates empty storage.
    pub fn new() -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            queue: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
            fail_enqueue: AtomicBool::new(false),
        }
    }

    /// Makes every subsequent enqueue fail with a storage error.
    pub fn fail_enqueues(&self, fail: bool) {
        self.fail_enqueue.store(fail, Ordering::SeqCst);
    }

    /// A copy of the current log, for assertions.
    pub async fn log_snapshot(&self) -> Vec<ChatEntry> {
        self.log.lock().await.clone()
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatStorage for MemoryStorage {
    async fn initialize(&self) -> Result<(), VitaError> {
        Ok(())
    }

    async fn append_entry(&self, entry: &ChatEntry) -> Result<(), VitaError> {
        self.log.lock().await.push(entry.clone());
        Ok(())
    }

    async fn load_log(&self) -> Result<Vec<ChatEntry>, VitaError> {
        Ok(self.log.lock().await.clone())
    }

    async fn enqueue_unsent(&self, entry: &ChatEntry) -> Result<i64, VitaError> {
        if self.fail_enqueue.load(Ordering::SeqCst) {
            return Err(VitaError::Storage {
                source: "enqueue failure injected by test".into(),
            });
        }
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.queue.lock().await.push(QueuedMessage {
            id,
            text: entry.text.clone(),
            sender: entry.sender,
            timestamp: entry.timestamp.clone(),
        });
        Ok(id)
    }

    async fn list_unsent(&self) -> Result<Vec<QueuedMessage>, VitaError> {
        Ok(self.queue.lock().await.clone())
    }

    async fn clear_unsent(&self) -> Result<(), VitaError> {
        self.queue.lock().await.clear();
        Ok(())
    }

    async fn close(&self) -> Result<(), VitaError> {
        Ok(())
    }
}
