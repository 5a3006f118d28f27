// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message intake: the submit path for composed user messages.

use std::sync::Arc;

use tracing::{error, warn};
use vita_core::{ChatEntry, ChatStorage, ConnectivityState, VitaError};

use crate::dispatch::Dispatcher;

/// Notice appended when no API credential is configured.
pub const MISSING_CREDENTIAL_NOTICE: &str = "Please set your API key in settings.";

/// Notice appended when a delivery attempt fails.
pub const DELIVERY_FAILED_NOTICE: &str = "Failed to reach the assistant.";

/// Routes a composed message to the dispatcher or the unsent queue.
///
/// The user entry always lands in the log first, so the conversation
/// reflects the attempt regardless of outcome. Storage failures on this
/// path are logged and swallowed; submission never surfaces an error.
pub struct MessageIntake {
    storage: Arc<dyn ChatStorage>,
    dispatcher: Arc<Dispatcher>,
    connectivity: ConnectivityState,
}

impl MessageIntake {
    /// Creates an intake over the given storage, dispatcher, and signal.
    pub fn new(
        storage: Arc<dyn ChatStorage>,
        dispatcher: Arc<Dispatcher>,
        connectivity: ConnectivityState,
    ) -> Self {
        Self {
            storage,
            dispatcher,
            connectivity,
        }
    }

    /// Submits one composed message.
    ///
    /// Online: one delivery attempt; a failed delivery appends a failure
    /// notice and falls back to the queue. A missing credential appends a
    /// prompt notice and does not queue — nothing was sent, and nothing
    /// will be resent later either.
    /// Offline: straight to the queue, the dispatcher is never touched.
    pub async fn submit(&self, text: &str) {
        let entry = ChatEntry::user(text);
        if let Err(e) = self.storage.append_entry(&entry).await {
            error!(error = %e, "failed to record user message");
        }

        if !self.connectivity.is_online() {
            self.enqueue(&entry).await;
            return;
        }

        match self.dispatcher.deliver(text).await {
            Ok(_) => {}
            Err(VitaError::MissingCredential) => {
                self.append_notice(MISSING_CREDENTIAL_NOTICE).await;
            }
            Err(e) => {
                warn!(error = %e, "delivery failed, queueing message for a later sync");
                self.append_notice(DELIVERY_FAILED_NOTICE).await;
                self.enqueue(&entry).await;
            }
        }
    }

    async fn enqueue(&self, entry: &ChatEntry) {
        if let Err(e) = self.storage.enqueue_unsent(entry).await {
            error!(error = %e, "failed to queue unsent message");
        }
    }

    async fn append_notice(&self, text: &str) {
        if let Err(e) = self.storage.append_entry(&ChatEntry::assistant(text)).await {
            error!(error = %e, "failed to record notice");
        }
    }
}
