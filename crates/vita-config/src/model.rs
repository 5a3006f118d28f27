// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Vita chat client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Vita configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VitaConfig {
    /// Client identity and behavior settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Remote completion endpoint settings.
    #[serde(default)]
    pub openai: OpenAiConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Motivational reminder settings.
    #[serde(default)]
    pub reminder: ReminderConfig,
}

/// Client identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the client.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "vita".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Remote completion endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenAiConfig {
    /// API key. `None` falls back to environment variable, then the
    /// credential file.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Path to the plain-text credential file. `None` uses the default
    /// location under the XDG config directory.
    #[serde(default)]
    pub api_key_file: Option<String>,

    /// Default model to use for requests.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Secondary model the session can toggle to.
    #[serde(default = "default_alternate_model")]
    pub alternate_model: String,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_file: None,
            default_model: default_model(),
            alternate_model: default_alternate_model(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_alternate_model() -> String {
    "gpt-3.5-turbo".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("vita").join("vita.db"))
        .and_then(|p| p.to_str().map(String::from))
        .unwrap_or_else(|| "vita.db".to_string())
}

fn default_wal_mode() -> bool {
    true
}

/// Motivational reminder configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ReminderConfig {
    /// Whether the periodic reminder runner is active in long-lived modes.
    #[serde(default = "default_reminder_enabled")]
    pub enabled: bool,

    /// Seconds between reminders.
    #[serde(default = "default_reminder_interval_secs")]
    pub interval_secs: u64,

    /// Messages appended to the log, in rotation.
    #[serde(default = "default_reminder_messages")]
    pub messages: Vec<String>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            enabled: default_reminder_enabled(),
            interval_secs: default_reminder_interval_secs(),
            messages: default_reminder_messages(),
        }
    }
}

fn default_reminder_enabled() -> bool {
    true
}

fn default_reminder_interval_secs() -> u64 {
    3600
}

fn default_reminder_messages() -> Vec<String> {
    [
        "You're doing great!",
        "Time to move!",
        "Eat something healthy!",
        "Drink water!",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
