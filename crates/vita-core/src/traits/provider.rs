// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Completion provider trait for remote language-model endpoints.

use async_trait::async_trait;

use crate::error::VitaError;
use crate::types::{CompletionRequest, CompletionResponse};

/// A remote chat-completion endpoint.
///
/// One call is one delivery attempt: implementations issue exactly one
/// request and never retry. A missing credential is reported as
/// [`VitaError::MissingCredential`] without touching the network.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Sends a single-turn completion request and returns the response.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, VitaError>;
}
