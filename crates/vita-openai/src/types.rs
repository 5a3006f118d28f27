// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat-completions API request/response types.

use serde::{Deserialize, Serialize};

// --- Request types ---

/// A request to the chat-completions endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model identifier (e.g., "gpt-4o").
    pub model: String,

    /// Conversation messages: one system turn, one user turn.
    pub messages: Vec<ApiMessage>,
}

/// A single message in the chat-completions conversation format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Role: "system" or "user".
    pub role: String,

    /// Plain text content.
    pub content: String,
}

// --- Response types ---

/// A response from the chat-completions endpoint.
///
/// Every field an extraction path touches is defaulted: a structurally
/// sparse body still deserializes, and the missing pieces surface as an
/// absent completion rather than a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the first one carries the reply.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatResponse {
    /// Extracts the first completion's text, if structurally present.
    pub fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
    }
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The completion message, if present.
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// The message within a completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    /// The completion text, if present.
    #[serde(default)]
    pub content: Option<String>,
}

// --- Error types ---

/// Error envelope returned by the endpoint on failures.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

/// Detail of an endpoint error.
#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error category.
    #[serde(rename = "type", default)]
    pub type_: String,
    /// Human-readable description.
    #[serde(default)]
    pub message: String,
}
