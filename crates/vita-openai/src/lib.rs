// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible completion provider for the Vita chat client.
//!
//! This crate implements [`CompletionProvider`] for the chat-completions
//! API: single-shot, non-streaming, one attempt per delivery.

pub mod client;
pub mod types;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use vita_core::{
    CompletionProvider, CompletionRequest, CompletionResponse, CredentialStore, VitaError,
};

use crate::client::OpenAiClient;
use crate::types::{ApiMessage, ChatRequest};

/// System prompt used when a request does not carry its own.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful health assistant.";

/// Chat-completions provider implementing [`CompletionProvider`].
///
/// The credential is resolved from the [`CredentialStore`] on every call;
/// when absent, the call fails with [`VitaError::MissingCredential`] before
/// any request is built.
pub struct OpenAiProvider {
    client: OpenAiClient,
    credentials: Arc<dyn CredentialStore>,
}

impl OpenAiProvider {
    /// Creates a new provider over the given credential source.
    pub fn new(credentials: Arc<dyn CredentialStore>) -> Result<Self, VitaError> {
        let client = OpenAiClient::new()?;
        debug!("completion provider initialized");
        Ok(Self {
            client,
            credentials,
        })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: OpenAiClient, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            client,
            credentials,
        }
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, VitaError> {
        let Some(api_key) = self.credentials.get() else {
            return Err(VitaError::MissingCredential);
        };

        let system = request
            .system_prompt
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        let api_request = ChatRequest {
            model: request.model.clone(),
            messages: vec![
                ApiMessage {
                    role: "system".to_string(),
                    content: system,
                },
                ApiMessage {
                    role: "user".to_string(),
                    content: request.user_text,
                },
            ],
        };

        let response = self.client.chat(&api_key, &api_request).await?;
        Ok(CompletionResponse {
            content: response.into_content(),
            model: request.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct FixedCredential(Option<String>);

    impl CredentialStore for FixedCredential {
        fn get(&self) -> Option<String> {
            self.0.clone()
        }

        fn set(&self, _value: &str) -> Result<(), VitaError> {
            Ok(())
        }
    }

    fn provider_for(server_url: &str, key: Option<&str>) -> OpenAiProvider {
        let client = OpenAiClient::new()
            .unwrap()
            .with_base_url(server_url.to_string());
        OpenAiProvider::with_client(
            client,
            Arc::new(FixedCredential(key.map(String::from))),
        )
    }

    fn request(user_text: &str) -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4o".to_string(),
            system_prompt: None,
            user_text: user_text.to_string(),
        }
    }

    #[tokio::test]
    async fn complete_returns_first_completion_text() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Rest well!"}}]
        });
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri(), Some("sk-test"));
        let response = provider.complete(request("I feel tired")).await.unwrap();
        assert_eq!(response.content.as_deref(), Some("Rest well!"));
        assert_eq!(response.model, "gpt-4o");
    }

    #[tokio::test]
    async fn complete_sends_default_system_prompt() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "ok"}}]
        });
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": DEFAULT_SYSTEM_PROMPT},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri(), Some("sk-test"));
        provider.complete(request("hello")).await.unwrap();
    }

    #[tokio::test]
    async fn complete_with_override_system_prompt() {
        let server = MockServer::start().await;

        let body = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "done"}}]
        });
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "messages": [{"role": "system", "content": "Summarize this."}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&body))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri(), Some("sk-test"));
        let mut req = request("log text");
        req.system_prompt = Some("Summarize this.".to_string());
        provider.complete(req).await.unwrap();
    }

    #[tokio::test]
    async fn missing_credential_issues_no_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri(), None);
        let err = provider.complete(request("hello")).await.unwrap_err();
        assert!(matches!(err, VitaError::MissingCredential));
    }

    #[tokio::test]
    async fn structurally_absent_completion_is_not_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let provider = provider_for(&server.uri(), Some("sk-test"));
        let response = provider.complete(request("hello")).await.unwrap();
        assert!(response.content.is_none());
    }
}
