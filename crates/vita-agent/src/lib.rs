// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message coordination for the Vita chat client.
//!
//! This crate wires the stores, the completion provider, and the
//! connectivity signal into the submit path:
//! - [`MessageIntake`] logs every composed message and routes it to the
//!   dispatcher (online) or the unsent queue (offline / failed)
//! - [`Dispatcher`] performs exactly one delivery attempt per message
//! - [`Synchronizer`] drains the queue at startup and on every
//!   became-online transition, stopping at the first failure
//! - [`ChatSession`] is the context object threading all of it together
//! - [`ReminderRunner`] appends periodic motivational entries

pub mod dispatch;
pub mod intake;
pub mod reminder;
pub mod session;
pub mod sync;

pub use dispatch::{Dispatcher, NO_RESPONSE_PLACEHOLDER};
pub use intake::{MessageIntake, DELIVERY_FAILED_NOTICE, MISSING_CREDENTIAL_NOTICE};
pub use reminder::ReminderRunner;
pub use session::{ChatSession, ModelSelection, NO_SUMMARY_PLACEHOLDER};
pub use sync::{SyncOutcome, Synchronizer};
