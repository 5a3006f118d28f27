// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation log operations.

use rusqlite::params;
use vita_core::VitaError;

use crate::database::Database;
use crate::models::{ChatEntry, Sender};

/// Append one entry to the conversation log.
pub async fn append_entry(db: &Database, entry: &ChatEntry) -> Result<(), VitaError> {
    let entry = entry.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO chat_log (sender, body, created_at) VALUES (?1, ?2, ?3)",
                params![entry.sender.to_string(), entry.text, entry.timestamp],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Load the full conversation log in insertion order.
///
/// Rows whose sender column does not parse are dropped rather than failing
/// the whole load.
pub async fn load_log(db: &Database) -> Result<Vec<ChatEntry>, VitaError> {
    db.connection()
        .call(|conn| {
            let mut stmt = conn.prepare(
                "SELECT sender, body, created_at FROM chat_log ORDER BY id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?;

            let mut entries = Vec::new();
            for row in rows {
                let (sender, body, created_at) = row?;
                let Ok(sender) = sender.parse::<Sender>() else {
                    continue;
                };
                entries.push(ChatEntry {
                    text: body,
                    sender,
                    timestamp: created_at,
                });
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
