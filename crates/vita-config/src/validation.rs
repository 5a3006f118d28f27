// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and positive intervals.

use crate::diagnostic::ConfigError;
use crate::model::VitaConfig;

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &VitaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !VALID_LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.log_level must be one of {}, got `{}`",
                VALID_LOG_LEVELS.join(", "),
                config.agent.log_level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.openai.default_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.default_model must not be empty".to_string(),
        });
    }

    if config.openai.alternate_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "openai.alternate_model must not be empty".to_string(),
        });
    }

    if config.reminder.interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "reminder.interval_secs must be at least 1".to_string(),
        });
    }

    if config.reminder.enabled && config.reminder.messages.is_empty() {
        errors.push(ConfigError::Validation {
            message: "reminder.messages must not be empty when reminders are enabled"
                .to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
