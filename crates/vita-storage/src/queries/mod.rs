// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules over the database collections.

pub mod log;
pub mod queue;
