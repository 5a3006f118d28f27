// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session context object.
//!
//! [`ChatSession`] is built once at startup and threaded through every
//! caller, replacing cross-call globals: it owns the model selection, the
//! connectivity signal, and the wired-up intake, dispatcher, and
//! synchronizer over shared storage and provider handles.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;
use vita_config::VitaConfig;
use vita_core::{
    ChatEntry, ChatStorage, CompletionProvider, CompletionRequest, ConnectivityState,
    QueuedMessage, VitaError,
};

use crate::dispatch::Dispatcher;
use crate::intake::MessageIntake;
use crate::sync::{SyncOutcome, Synchronizer};

/// System prompt for whole-log summarization.
const SUMMARY_SYSTEM_PROMPT: &str = "Summarize this health log and give motivation.";

/// Shown when the summary response carried no completion.
pub const NO_SUMMARY_PLACEHOLDER: &str = "No summary available.";

/// The currently selected model, shared across components.
#[derive(Clone)]
pub struct ModelSelection {
    inner: Arc<RwLock<String>>,
}

impl ModelSelection {
    /// Creates a selection starting at `model`.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(model.into())),
        }
    }

    /// The active model identifier.
    pub async fn active(&self) -> String {
        self.inner.read().await.clone()
    }

    /// Replaces the active model.
    pub async fn set(&self, model: impl Into<String>) {
        *self.inner.write().await = model.into();
    }
}

/// One client session: the explicit context object for all operations.
pub struct ChatSession {
    storage: Arc<dyn ChatStorage>,
    provider: Arc<dyn CompletionProvider>,
    intake: MessageIntake,
    synchronizer: Arc<Synchronizer>,
    connectivity: ConnectivityState,
    models: ModelSelection,
    default_model: String,
    alternate_model: String,
}

impl ChatSession {
    /// Wires up a session from configuration and the shared collaborators.
    pub fn new(
        config: &VitaConfig,
        storage: Arc<dyn ChatStorage>,
        provider: Arc<dyn CompletionProvider>,
        connectivity: ConnectivityState,
    ) -> Self {
        let models = ModelSelection::new(&config.openai.default_model);
        let dispatcher = Arc::new(Dispatcher::new(
            provider.clone(),
            storage.clone(),
            models.clone(),
        ));
        let intake = MessageIntake::new(storage.clone(), dispatcher.clone(), connectivity.clone());
        let synchronizer = Arc::new(Synchronizer::new(
            storage.clone(),
            dispatcher,
            connectivity.clone(),
        ));

        Self {
            storage,
            provider,
            intake,
            synchronizer,
            connectivity,
            models,
            default_model: config.openai.default_model.clone(),
            alternate_model: config.openai.alternate_model.clone(),
        }
    }

    /// Submits one composed message (logs it, then delivers or queues).
    pub async fn submit(&self, text: &str) {
        self.intake.submit(text).await;
    }

    /// Runs one synchronization pass over the unsent queue.
    pub async fn sync(&self) -> Result<SyncOutcome, VitaError> {
        self.synchronizer.sync_once().await
    }

    /// The synchronizer, for driving the long-running `run` loop.
    pub fn synchronizer(&self) -> Arc<Synchronizer> {
        self.synchronizer.clone()
    }

    /// The shared connectivity signal.
    pub fn connectivity(&self) -> &ConnectivityState {
        &self.connectivity
    }

    /// The shared storage handle.
    pub fn storage(&self) -> Arc<dyn ChatStorage> {
        self.storage.clone()
    }

    /// Loads the full conversation log.
    pub async fn history(&self) -> Result<Vec<ChatEntry>, VitaError> {
        self.storage.load_log().await
    }

    /// Lists the messages currently awaiting delivery.
    pub async fn queued(&self) -> Result<Vec<QueuedMessage>, VitaError> {
        self.storage.list_unsent().await
    }

    /// The active model identifier.
    pub async fn active_model(&self) -> String {
        self.models.active().await
    }

    /// Switches between the default and alternate models. Returns the model
    /// now active.
    pub async fn toggle_model(&self) -> String {
        let next = if self.models.active().await == self.default_model {
            self.alternate_model.clone()
        } else {
            self.default_model.clone()
        };
        self.models.set(&next).await;
        debug!(model = next.as_str(), "model switched");
        next
    }

    /// Summarizes the whole conversation log through the provider and
    /// appends the summary to the log.
    ///
    /// The transcript is sent as one user turn of `[sender] text` lines
    /// under a fixed summarization prompt.
    pub async fn summarize(&self) -> Result<String, VitaError> {
        let entries = self.storage.load_log().await?;
        let transcript = entries
            .iter()
            .map(|e| format!("[{}] {}", e.sender, e.text))
            .collect::<Vec<_>>()
            .join("\n");

        let request = CompletionRequest {
            model: self.models.active().await,
            system_prompt: Some(SUMMARY_SYSTEM_PROMPT.to_string()),
            user_text: transcript,
        };
        let response = self.provider.complete(request).await?;

        let summary = response
            .content
            .unwrap_or_else(|| NO_SUMMARY_PLACEHOLDER.to_string());
        self.storage
            .append_entry(&ChatEntry::assistant(&summary))
            .await?;
        Ok(summary)
    }

    /// Closes the underlying storage.
    pub async fn close(&self) -> Result<(), VitaError> {
        self.storage.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vita_core::Sender;
    use vita_test_utils::{MemoryStorage, MockCompleter};

    fn session_with(mock: Arc<MockCompleter>, storage: Arc<MemoryStorage>) -> ChatSession {
        ChatSession::new(
            &VitaConfig::default(),
            storage,
            mock,
            ConnectivityState::new(true),
        )
    }

    #[tokio::test]
    async fn toggle_model_flips_between_configured_pair() {
        let session = session_with(
            Arc::new(MockCompleter::new()),
            Arc::new(MemoryStorage::new()),
        );

        assert_eq!(session.active_model().await, "gpt-4o");
        assert_eq!(session.toggle_model().await, "gpt-3.5-turbo");
        assert_eq!(session.toggle_model().await, "gpt-4o");
    }

    #[tokio::test]
    async fn summarize_sends_formatted_transcript() {
        let mock = Arc::new(MockCompleter::with_replies(vec!["Great progress!"]));
        let storage = Arc::new(MemoryStorage::new());
        storage.append_entry(&ChatEntry::user("I walked today")).await.unwrap();
        storage
            .append_entry(&ChatEntry::assistant("Nice work"))
            .await
            .unwrap();

        let session = session_with(mock.clone(), storage.clone());
        let summary = session.summarize().await.unwrap();
        assert_eq!(summary, "Great progress!");

        let requests = mock.requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].system_prompt.as_deref(),
            Some(SUMMARY_SYSTEM_PROMPT)
        );
        assert_eq!(
            requests[0].user_text,
            "[user] I walked today\n[assistant] Nice work"
        );

        // The summary itself joins the log.
        let log = storage.log_snapshot().await;
        assert_eq!(log.last().unwrap().text, "Great progress!");
        assert_eq!(log.last().unwrap().sender, Sender::Assistant);
    }

    #[tokio::test]
    async fn summarize_without_completion_uses_placeholder() {
        let mock = Arc::new(MockCompleter::new());
        mock.push_empty().await;
        let storage = Arc::new(MemoryStorage::new());
        let session = session_with(mock, storage);

        let summary = session.summarize().await.unwrap();
        assert_eq!(summary, NO_SUMMARY_PLACEHOLDER);
    }
}
