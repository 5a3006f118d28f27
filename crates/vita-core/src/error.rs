// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Vita chat client.

use thiserror::Error;

/// The primary error type used across all Vita components.
#[derive(Debug, Error)]
pub enum VitaError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Durable store errors (database open, transaction failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No API credential is configured; no network call was attempted.
    #[error("no API credential configured")]
    MissingCredential,

    /// A delivery attempt failed (transport error, non-2xx status, malformed body).
    #[error("delivery failed: {message}")]
    Delivery {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
