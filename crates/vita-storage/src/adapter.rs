// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the ChatStorage trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use vita_config::model::StorageConfig;
use vita_core::types::{ChatEntry, QueuedMessage};
use vita_core::{ChatStorage, VitaError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed chat storage.
///
/// Wraps a [`Database`] handle and delegates all operations to the typed
/// query modules. The database is lazily opened on the first call to
/// [`ChatStorage::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until `initialize` is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns the underlying Database, or an error if not initialized.
    fn db(&self) -> Result<&Database, VitaError> {
        self.db.get().ok_or_else(|| VitaError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl ChatStorage for SqliteStorage {
    async fn initialize(&self) -> Result<(), VitaError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| VitaError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn append_entry(&self, entry: &ChatEntry) -> Result<(), VitaError> {
        queries::log::append_entry(self.db()?, entry).await
    }

    async fn load_log(&self) -> Result<Vec<ChatEntry>, VitaError> {
        queries::log::load_log(self.db()?).await
    }

    async fn enqueue_unsent(&self, entry: &ChatEntry) -> Result<i64, VitaError> {
        queries::queue::enqueue(self.db()?, entry).await
    }

    async fn list_unsent(&self) -> Result<Vec<QueuedMessage>, VitaError> {
        queries::queue::list_unsent(self.db()?).await
    }

    async fn clear_unsent(&self) -> Result<(), VitaError> {
        queries::queue::clear(self.db()?).await
    }

    async fn close(&self) -> Result<(), VitaError> {
        if let Some(db) = self.db.get() {
            db.close().await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use vita_core::Sender;

    fn storage_at(dir: &tempfile::TempDir) -> SqliteStorage {
        SqliteStorage::new(StorageConfig {
            database_path: dir.path().join("test.db").to_string_lossy().to_string(),
            wal_mode: true,
        })
    }

    #[tokio::test]
    async fn operations_before_initialize_fail() {
        let dir = tempdir().unwrap();
        let storage = storage_at(&dir);
        let err = storage.load_log().await.unwrap_err();
        assert!(matches!(err, VitaError::Storage { .. }));
    }

    #[tokio::test]
    async fn log_and_queue_are_independent() {
        let dir = tempdir().unwrap();
        let storage = storage_at(&dir);
        storage.initialize().await.unwrap();

        let entry = ChatEntry::user("offline note");
        storage.append_entry(&entry).await.unwrap();
        storage.enqueue_unsent(&entry).await.unwrap();

        // Clearing the queue leaves the log untouched.
        storage.clear_unsent().await.unwrap();
        assert!(storage.list_unsent().await.unwrap().is_empty());

        let log = storage.load_log().await.unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].sender, Sender::User);
        assert_eq!(log[0].text, "offline note");

        storage.close().await.unwrap();
    }

    #[tokio::test]
    async fn double_initialize_is_an_error() {
        let dir = tempdir().unwrap();
        let storage = storage_at(&dir);
        storage.initialize().await.unwrap();
        assert!(storage.initialize().await.is_err());
        storage.close().await.unwrap();
    }
}
