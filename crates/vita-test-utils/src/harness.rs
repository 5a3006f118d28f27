// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete session over a temp SQLite database
//! and a scripted mock provider, so tests drive the real submit/sync
//! pipeline end to end.

use std::sync::Arc;

use vita_agent::ChatSession;
use vita_config::model::StorageConfig;
use vita_config::VitaConfig;
use vita_core::{ChatStorage, ConnectivityState, VitaError};
use vita_storage::SqliteStorage;

use crate::mock_provider::MockCompleter;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<String>,
    online: bool,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            online: true,
        }
    }

    /// Pre-script successful provider replies.
    pub fn with_replies(mut self, replies: Vec<impl Into<String>>) -> Self {
        self.replies = replies.into_iter().map(Into::into).collect();
        self
    }

    /// Set the initial connectivity state (default: online).
    pub fn online(mut self, online: bool) -> Self {
        self.online = online;
        self
    }

    /// Build the test harness, creating the temp database and session.
    pub async fn build(self) -> Result<TestHarness, VitaError> {
        let temp_dir = tempfile::TempDir::new().map_err(|e| VitaError::Storage {
            source: e.into(),
        })?;
        let db_path = temp_dir.path().join("test.db");

        let storage = SqliteStorage::new(StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        });
        storage.initialize().await?;
        let storage: Arc<dyn ChatStorage> = Arc::new(storage);

        let provider = Arc::new(if self.replies.is_empty() {
            MockCompleter::new()
        } else {
            MockCompleter::with_replies(self.replies)
        });

        let connectivity = ConnectivityState::new(self.online);
        let session = ChatSession::new(
            &VitaConfig::default(),
            storage.clone(),
            provider.clone(),
            connectivity.clone(),
        );

        Ok(TestHarness {
            session,
            provider,
            storage,
            connectivity,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment over temp storage and a mock provider.
pub struct TestHarness {
    /// The wired-up session under test.
    pub session: ChatSession,
    /// The scripted mock provider.
    pub provider: Arc<MockCompleter>,
    /// Direct storage access for assertions.
    pub storage: Arc<dyn ChatStorage>,
    /// The shared connectivity signal.
    pub connectivity: ConnectivityState,
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Start building a harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }
}
