// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Vita chat client.
//!
//! This crate provides the foundational trait definitions, error types, and
//! common types used throughout the Vita workspace: the conversation log
//! entry model, the unsent-message queue model, the collaborator traits
//! (completion provider, durable storage, credential store), and the shared
//! connectivity signal.

pub mod connectivity;
pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use connectivity::{ConnectivityState, OnlineEvents};
pub use error::VitaError;
pub use types::{ChatEntry, CompletionRequest, CompletionResponse, QueuedMessage, Sender};

pub use traits::{ChatStorage, CompletionProvider, CredentialStore};
