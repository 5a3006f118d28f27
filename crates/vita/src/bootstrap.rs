// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session wiring shared by the CLI commands.

use std::sync::Arc;

use vita_agent::ChatSession;
use vita_config::{FileCredentialStore, VitaConfig};
use vita_core::{ChatStorage, CompletionProvider, ConnectivityState, CredentialStore, VitaError};
use vita_openai::OpenAiProvider;
use vita_storage::SqliteStorage;

/// Builds a fully wired session: storage, credentials, provider, signal.
pub async fn build_session(config: &VitaConfig, online: bool) -> Result<ChatSession, VitaError> {
    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn ChatStorage> = Arc::new(storage);

    let credentials: Arc<dyn CredentialStore> =
        Arc::new(FileCredentialStore::new(&config.openai));
    let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiProvider::new(credentials)?);

    let connectivity = ConnectivityState::new(online);
    Ok(ChatSession::new(config, storage, provider, connectivity))
}
