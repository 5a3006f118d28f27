// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery dispatch: one completion attempt per message.

use std::sync::Arc;

use tracing::{debug, error};
use vita_core::{ChatEntry, ChatStorage, CompletionProvider, CompletionRequest, VitaError};

use crate::session::ModelSelection;

/// Shown in place of a reply when the endpoint answered without one.
pub const NO_RESPONSE_PLACEHOLDER: &str = "No response.";

/// Forwards one message to the completion provider and records the reply.
///
/// Exactly one request per call; retry only happens through the next
/// synchronizer pass. On failure nothing is written — whether the message
/// gets queued is the caller's decision.
pub struct Dispatcher {
    provider: Arc<dyn CompletionProvider>,
    storage: Arc<dyn ChatStorage>,
    models: ModelSelection,
}

impl Dispatcher {
    /// Creates a dispatcher over the given provider and storage.
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        storage: Arc<dyn ChatStorage>,
        models: ModelSelection,
    ) -> Self {
        Self {
            provider,
            storage,
            models,
        }
    }

    /// Attempts delivery of `text` with the currently selected model.
    ///
    /// On success the assistant reply (or [`NO_RESPONSE_PLACEHOLDER`] when
    /// the response carried no completion) is appended to the log and
    /// returned. A log write failure after a successful delivery is logged
    /// and swallowed; the delivery still counts as successful.
    pub async fn deliver(&self, text: &str) -> Result<String, VitaError> {
        let model = self.models.active().await;
        debug!(model = model.as_str(), "delivering message");

        let request = CompletionRequest {
            model,
            system_prompt: None,
            user_text: text.to_string(),
        };
        let response = self.provider.complete(request).await?;

        let reply = response
            .content
            .unwrap_or_else(|| NO_RESPONSE_PLACEHOLDER.to_string());
        if let Err(e) = self.storage.append_entry(&ChatEntry::assistant(&reply)).await {
            error!(error = %e, "failed to record assistant reply");
        }

        Ok(reply)
    }
}
