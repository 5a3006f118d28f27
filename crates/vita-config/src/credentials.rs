// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed credential store for the remote endpoint API key.
//!
//! Resolution order: config `openai.api_key`, then the `VITA_OPENAI_API_KEY`
//! or `OPENAI_API_KEY` environment variables, then the credential file.
//! The file is plain text; encrypting stored credentials is out of scope.

use std::path::{Path, PathBuf};

use tracing::warn;
use vita_core::{CredentialStore, VitaError};

use crate::model::OpenAiConfig;

/// Environment variables consulted before the credential file.
const ENV_KEYS: &[&str] = &["VITA_OPENAI_API_KEY", "OPENAI_API_KEY"];

/// Credential store backed by config, environment, and a plain-text file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    config_key: Option<String>,
    path: PathBuf,
    use_env: bool,
}

impl FileCredentialStore {
    /// Creates a store from the endpoint configuration.
    ///
    /// When `api_key_file` is unset, the file defaults to
    /// `~/.config/vita/credential`.
    pub fn new(config: &OpenAiConfig) -> Self {
        let path = config
            .api_key_file
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(default_credential_path);
        Self {
            config_key: config.api_key.clone(),
            path,
            use_env: true,
        }
    }

    /// Creates a store over an explicit file path, ignoring config and env.
    /// Used by tests.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_key: None,
            path: path.into(),
            use_env: false,
        }
    }

    /// The credential file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_file(&self) -> Option<String> {
        let content = std::fs::read_to_string(&self.path).ok()?;
        let trimmed = content.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self) -> Option<String> {
        if let Some(key) = &self.config_key {
            return Some(key.clone());
        }
        if self.use_env {
            for var in ENV_KEYS {
                if let Ok(value) = std::env::var(var)
                    && !value.trim().is_empty()
                {
                    return Some(value.trim().to_string());
                }
            }
        }
        self.read_file()
    }

    fn set(&self, value: &str) -> Result<(), VitaError> {
        if let Some(parent) = self.path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(error = %e, path = %parent.display(), "failed to create credential directory");
            return Err(VitaError::Storage {
                source: Box::new(e),
            });
        }
        std::fs::write(&self.path, format!("{}\n", value.trim())).map_err(|e| {
            VitaError::Storage {
                source: Box::new(e),
            }
        })
    }
}

fn default_credential_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("vita").join("credential"))
        .unwrap_or_else(|| PathBuf::from("vita-credential"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_file_yields_no_credential() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::at_path(dir.path().join("credential"));
        assert!(store.get().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::at_path(dir.path().join("credential"));

        store.set("sk-test-123").unwrap();
        assert_eq!(store.get().as_deref(), Some("sk-test-123"));
    }

    #[test]
    fn set_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::at_path(dir.path().join("nested/deeper/credential"));

        store.set("sk-nested").unwrap();
        assert_eq!(store.get().as_deref(), Some("sk-nested"));
    }

    #[test]
    fn stored_value_is_trimmed() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::at_path(dir.path().join("credential"));

        store.set("  sk-padded  ").unwrap();
        assert_eq!(store.get().as_deref(), Some("sk-padded"));
    }

    #[test]
    fn whitespace_only_file_yields_no_credential() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credential");
        std::fs::write(&path, "   \n").unwrap();

        let store = FileCredentialStore::at_path(path);
        assert!(store.get().is_none());
    }

    #[test]
    fn config_key_takes_precedence_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credential");
        std::fs::write(&path, "sk-from-file\n").unwrap();

        let config = OpenAiConfig {
            api_key: Some("sk-from-config".to_string()),
            api_key_file: Some(path.to_string_lossy().to_string()),
            ..OpenAiConfig::default()
        };
        let store = FileCredentialStore::new(&config);
        assert_eq!(store.get().as_deref(), Some("sk-from-config"));
    }
}
