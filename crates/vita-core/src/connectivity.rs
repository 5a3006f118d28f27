// SPDX-FileCopyrightText: 2026 Vita Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared connectivity signal.
//!
//! [`ConnectivityState`] is a cloneable handle over a tokio watch channel:
//! the current value answers "is online?" on demand, and [`OnlineEvents`]
//! delivers edge-triggered became-online notifications to subscribers. A
//! subscription is dropped to detach; it holds no lock on the publisher.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::VitaError;

/// Queryable online/offline state with edge-triggered subscriptions.
#[derive(Debug, Clone)]
pub struct ConnectivityState {
    tx: Arc<watch::Sender<bool>>,
}

impl ConnectivityState {
    /// Creates a new signal with the given initial state.
    pub fn new(online: bool) -> Self {
        let (tx, _rx) = watch::channel(online);
        Self { tx: Arc::new(tx) }
    }

    /// Returns the current state.
    pub fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    /// Publishes a state change. Subscribers only wake on a transition,
    /// re-publishing the current value is harmless.
    pub fn set_online(&self, online: bool) {
        self.tx.send_replace(online);
    }

    /// Subscribes to future state transitions.
    ///
    /// The subscription starts having seen the current value, so only
    /// transitions after this call are observed.
    pub fn subscribe(&self) -> OnlineEvents {
        OnlineEvents {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for ConnectivityState {
    fn default() -> Self {
        Self::new(true)
    }
}

/// A detachable subscription to became-online transitions.
#[derive(Debug)]
pub struct OnlineEvents {
    rx: watch::Receiver<bool>,
}

impl OnlineEvents {
    /// Completes the next time the signal transitions to online.
    ///
    /// Offline transitions are skipped. Errors only when every
    /// [`ConnectivityState`] handle has been dropped.
    pub async fn became_online(&mut self) -> Result<(), VitaError> {
        loop {
            self.rx
                .changed()
                .await
                .map_err(|_| VitaError::Internal("connectivity signal closed".to_string()))?;
            if *self.rx.borrow_and_update() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_current_state() {
        let state = ConnectivityState::new(false);
        assert!(!state.is_online());
        state.set_online(true);
        assert!(state.is_online());
    }

    #[tokio::test]
    async fn subscriber_wakes_on_online_transition() {
        let state = ConnectivityState::new(false);
        let mut events = state.subscribe();

        let waiter = tokio::spawn(async move { events.became_online().await });
        state.set_online(true);

        waiter.await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn subscriber_skips_offline_transitions() {
        let state = ConnectivityState::new(true);
        let mut events = state.subscribe();

        let waiter = tokio::spawn(async move {
            events.became_online().await.unwrap();
            true
        });

        // Going offline must not wake the subscriber; coming back must.
        state.set_online(false);
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        state.set_online(true);
        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn subscription_does_not_observe_prior_state() {
        let state = ConnectivityState::new(true);
        let mut events = state.subscribe();

        // Already online at subscribe time: no pending edge.
        let pending =
            tokio::time::timeout(std::time::Duration::from_millis(20), events.became_online())
                .await;
        assert!(pending.is_err(), "no transition should have been observed");
    }
}
