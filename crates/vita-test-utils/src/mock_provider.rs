// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock completion provider for deterministic testing.
//!
//! `MockCompleter` implements `CompletionProvider` with pre-scripted
//! outcomes, enabling fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use vita_core::{
    CompletionProvider, CompletionRequest, CompletionResponse, VitaError,
};

/// One scripted outcome for a `complete` call.
enum Outcome {
    /// Succeed with the given completion text.
    Reply(String),
    /// Succeed with a structurally absent completion.
    Empty,
    /// Fail with a delivery error carrying the given message.
    Fail(String),
    /// Fail as if no credential were configured.
    MissingCredential,
}

/// A mock completion provider that returns pre-scripted outcomes.
///
/// Outcomes are popped from a FIFO queue; when the queue is empty, a
/// default "mock response" reply is returned. Every received request is
/// recorded for assertions.
pub struct MockCompleter {
    outcomes: Arc<Mutex<VecDeque<Outcome>>>,
    requests: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockCompleter {
    /// Create a new mock with an empty outcome queue.
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock pre-loaded with successful replies.
    pub fn with_replies(replies: Vec<impl Into<String>>) -> Self {
        let queue = replies
            .into_iter()
            .map(|reply| Outcome::Reply(reply.into()))
            .collect();
        Self {
            outcomes: Arc::new(Mutex::new(queue)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script a successful reply.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Outcome::Reply(text.into()));
    }

    /// Script a structurally absent completion.
    pub async fn push_empty(&self) {
        self.outcomes.lock().await.push_back(Outcome::Empty);
    }

    /// Script a delivery failure.
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Outcome::Fail(message.into()));
    }

    /// Script a missing-credential failure.
    pub async fn push_missing_credential(&self) {
        self.outcomes.lock().await.push_back(Outcome::MissingCredential);
    }

    /// All requests received so far, in call order.
    pub async fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().await.clone()
    }
}

impl Default for MockCompleter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompleter {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, VitaError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);

        let outcome = self
            .outcomes
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Outcome::Reply("mock response".to_string()));

        match outcome {
            Outcome::Reply(text) => Ok(CompletionResponse {
                content: Some(text),
                model,
            }),
            Outcome::Empty => Ok(CompletionResponse {
                content: None,
                model,
            }),
            Outcome::Fail(message) => Err(VitaError::Delivery {
                message,
                source: None,
            }),
            Outcome::MissingCredential => Err(VitaError::MissingCredential),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest {
            model: "test-model".to_string(),
            system_prompt: None,
            user_text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn default_response_when_queue_empty() {
        let mock = MockCompleter::new();
        let resp = mock.complete(request("hi")).await.unwrap();
        assert_eq!(resp.content.as_deref(), Some("mock response"));
    }

    #[tokio::test]
    async fn scripted_outcomes_pop_in_order() {
        let mock = MockCompleter::with_replies(vec!["first", "second"]);
        mock.push_failure("third fails").await;

        assert_eq!(
            mock.complete(request("a")).await.unwrap().content.as_deref(),
            Some("first")
        );
        assert_eq!(
            mock.complete(request("b")).await.unwrap().content.as_deref(),
            Some("second")
        );
        assert!(mock.complete(request("c")).await.is_err());
    }

    #[tokio::test]
    async fn requests_are_recorded() {
        let mock = MockCompleter::new();
        mock.complete(request("one")).await.unwrap();
        mock.complete(request("two")).await.unwrap();

        let seen = mock.requests().await;
        assert_eq!(
            seen.iter().map(|r| r.user_text.as_str()).collect::<Vec<_>>(),
            vec!["one", "two"]
        );
    }

    #[tokio::test]
    async fn empty_outcome_has_no_content() {
        let mock = MockCompleter::new();
        mock.push_empty().await;
        let resp = mock.complete(request("x")).await.unwrap();
        assert!(resp.content.is_none());
    }
}
