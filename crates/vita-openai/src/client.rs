// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the chat-completions endpoint.
//!
//! Provides [`OpenAiClient`] which handles request construction,
//! authentication, and response decoding. One call is one attempt: there is
//! no retry and no timeout beyond the transport's own default.

use reqwest::header::{HeaderMap, HeaderValue};
use tracing::debug;
use vita_core::VitaError;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Base URL for the chat-completions endpoint.
const API_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// HTTP client for chat-completion requests.
///
/// The bearer credential is supplied per request so a key configured at
/// runtime is picked up without rebuilding the client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new chat-completions client.
    pub fn new() -> Result<Self, VitaError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| VitaError::Delivery {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends one completion request and returns the decoded response.
    ///
    /// Transport failures, non-2xx statuses, and bodies that are not valid
    /// JSON all map to [`VitaError::Delivery`]. A parseable body with no
    /// completion inside is NOT an error; extraction is the caller's call.
    pub async fn chat(
        &self,
        api_key: &str,
        request: &ChatRequest,
    ) -> Result<ChatResponse, VitaError> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| VitaError::Delivery {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            })?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                )
            } else {
                format!("API returned {status}: {body}")
            };
            return Err(VitaError::Delivery {
                message,
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| VitaError::Delivery {
            message: format!("failed to read response body: {e}"),
            source: Some(Box::new(e)),
        })?;
        serde_json::from_str(&body).map_err(|e| VitaError::Delivery {
            message: format!("failed to parse API response: {e}"),
            source: Some(Box::new(e)),
        })
    }
}
