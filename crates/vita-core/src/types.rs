// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Vita components.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which side of the conversation produced an entry.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The human user.
    User,
    /// The assistant (also used for client-generated notices).
    Assistant,
}

/// One turn in the conversation log.
///
/// Entries are immutable after creation. The log's sequence order equals
/// creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatEntry {
    /// Message body.
    pub text: String,
    /// Who produced the entry.
    pub sender: Sender,
    /// RFC 3339 creation time, non-decreasing in log order.
    pub timestamp: String,
}

impl ChatEntry {
    /// Creates an entry stamped with the current time.
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a user entry stamped with the current time.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Creates an assistant entry stamped with the current time.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }
}

/// A user message held in the unsent queue, awaiting delivery.
///
/// The `id` is assigned by the queue store on insertion (auto-incrementing,
/// unique within the store) and determines drain order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedMessage {
    /// Store-local identifier assigned on insertion.
    pub id: i64,
    /// Message body.
    pub text: String,
    /// Always [`Sender::User`] for queued messages.
    pub sender: Sender,
    /// RFC 3339 creation time of the original submission.
    pub timestamp: String,
}

/// A single-turn request to a completion provider.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    /// Model identifier to use for this request.
    pub model: String,
    /// Overrides the provider's default system prompt when set.
    pub system_prompt: Option<String>,
    /// The user-role text.
    pub user_text: String,
}

/// A response from a completion provider.
#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// The first completion's text, or `None` when the response was
    /// structurally valid but carried no completion text. Callers pick
    /// their own placeholder for the `None` case.
    pub content: Option<String>,
    /// Model that produced the response.
    pub model: String,
}
