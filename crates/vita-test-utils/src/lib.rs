// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Vita integration tests.

pub mod harness;
pub mod memory_storage;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use memory_storage::MemoryStorage;
pub use mock_provider::MockCompleter;
