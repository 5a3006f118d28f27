// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unsent-message queue operations.
//!
//! The queue holds user messages composed while the endpoint was
//! unreachable. Reads never remove items; the only removal is the
//! unconditional batch [`clear`] issued after a drain.

use rusqlite::params;
use vita_core::VitaError;

use crate::database::Database;
use crate::models::{ChatEntry, QueuedMessage, Sender};

/// Enqueue a new item. Returns the auto-generated queue entry ID.
pub async fn enqueue(db: &Database, entry: &ChatEntry) -> Result<i64, VitaError> {
    let entry = entry.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO unsent_messages (sender, body, created_at) VALUES (?1, ?2, ?3)",
                params![entry.sender.to_string(), entry.text, entry.timestamp],
            )?;
            Ok(conn.last_insert_rowid())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Return every queued message in insertion order, without removing any.
pub async fn list_unsent(db: &Database) -> Result<Vec<QueuedMessage>, VitaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, sender, body, created_at FROM unsent_messages ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?;

            let mut messages = Vec::new();
            for row in rows {
                let (id, sender, body, created_at) = row?;
                let Ok(sender) = sender.parse::<Sender>() else {
                    continue;
                };
                messages.push(QueuedMessage {
                    id,
                    text: body,
                    sender,
                    timestamp: created_at,
                });
            }
            Ok(messages)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Empty the queue unconditionally.
pub async fn clear(db: &Database) -> Result<(), VitaError> {
    db.connection()
        .call(|conn| {
            conn.execute("DELETE FROM unsent_messages", [])?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}
