// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through tokio-rusqlite's single background
//! thread; the [`Database`] struct IS the single writer. Query modules accept
//! `&Database` and go through `connection().call()`. Do NOT create additional
//! connection instances for writes.

use std::path::Path;

use tokio_rusqlite::Connection;
use tracing::debug;
use vita_core::VitaError;

use crate::migrations;

/// Handle to the SQLite database behind a single background writer thread.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens (creating if necessary) the database at `path`.
    ///
    /// Parent directories are created, PRAGMAs are applied, and embedded
    /// migrations run to completion before the handle is returned.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, VitaError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| VitaError::Storage {
                source: Box::new(e),
            })?;
        }

        // PRAGMA setup and migrations run on a short-lived blocking
        // connection before the async handle takes over the file.
        let setup_path = path.to_string();
        tokio::task::spawn_blocking(move || -> Result<(), VitaError> {
            let mut conn =
                rusqlite::Connection::open(&setup_path).map_err(|e| VitaError::Storage {
                    source: Box::new(e),
                })?;
            let journal_mode = if wal_mode { "WAL" } else { "DELETE" };
            conn.execute_batch(&format!(
                "PRAGMA journal_mode = {journal_mode};\n\
                 PRAGMA busy_timeout = 5000;\n\
                 PRAGMA synchronous = NORMAL;"
            ))
            .map_err(|e| VitaError::Storage {
                source: Box::new(e),
            })?;
            migrations::run_migrations(&mut conn)
        })
        .await
        .map_err(|e| VitaError::Internal(format!("database setup task failed: {e}")))??;

        let conn = Connection::open(path).await.map_err(map_tr_err)?;
        debug!(path, wal_mode, "database opened");

        Ok(Self { conn })
    }

    /// The underlying async connection. All queries go through
    /// `connection().call(..)`.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Flushes the WAL back into the main database file.
    pub async fn close(&self) -> Result<(), VitaError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Maps a tokio-rusqlite error into the crate error type.
pub fn map_tr_err(e: tokio_rusqlite::Error) -> VitaError {
    VitaError::Storage {
        source: Box::new(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_file_and_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        // Both collections must exist after migration.
        let count: i64 = db
            .connection()
            .call(|conn| {
                let count = conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master
                     WHERE type = 'table' AND name IN ('chat_log', 'unsent_messages')",
                    [],
                    |row| row.get(0),
                )?;
                Ok(count)
            })
            .await
            .unwrap();
        assert_eq!(count, 2);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/deeper/test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();
        assert!(db_path.exists());
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");

        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();
        drop(db);

        // Migrations are tracked; a second open must not fail.
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();
    }
}
