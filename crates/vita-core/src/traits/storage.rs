// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage trait for the durable conversation log and unsent-message queue.

use async_trait::async_trait;

use crate::error::VitaError;
use crate::types::{ChatEntry, QueuedMessage};

/// Durable storage for the conversation log and the unsent-message queue.
///
/// The two collections are independent: an entry always lands in the log at
/// submission time, while its presence in the queue depends on the delivery
/// outcome. Implementations must keep both collections in insertion order
/// and make them survive a full application restart.
#[async_trait]
pub trait ChatStorage: Send + Sync {
    /// Initializes the backend (migrations, connections).
    async fn initialize(&self) -> Result<(), VitaError>;

    /// Appends one entry to the conversation log.
    async fn append_entry(&self, entry: &ChatEntry) -> Result<(), VitaError>;

    /// Loads the full conversation log in insertion order.
    ///
    /// Rows that fail to deserialize are discarded, not surfaced as errors.
    async fn load_log(&self) -> Result<Vec<ChatEntry>, VitaError>;

    /// Inserts a user entry into the unsent queue. Returns the assigned id.
    async fn enqueue_unsent(&self, entry: &ChatEntry) -> Result<i64, VitaError>;

    /// Returns every queued message in insertion order without removing any.
    async fn list_unsent(&self) -> Result<Vec<QueuedMessage>, VitaError>;

    /// Empties the unsent queue unconditionally.
    async fn clear_unsent(&self) -> Result<(), VitaError>;

    /// Closes the backend, flushing pending writes.
    async fn close(&self) -> Result<(), VitaError>;
}
