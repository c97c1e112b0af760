//! # Auth-state change channel
//!
//! Every provider owns one [`AuthEvents`] sender and publishes an
//! [`AuthStateChange`] whenever the session changes: sign-in, sign-out, token
//! refresh, expiry, or a change made elsewhere. Listeners hold an
//! [`AuthSubscription`]; dropping it unsubscribes.
//!
//! The channel is a `tokio::sync::broadcast`, which needs no runtime and works on
//! WASM. A listener that falls behind skips to the newest notifications, which is
//! safe because each notification carries the full session state.

use tokio::sync::broadcast::{self, error::RecvError};

use crate::models::{Session, User};

const CHANNEL_CAPACITY: usize = 16;

/// Why the session changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthChangeEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// A notification: the event and the session as it now stands.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthStateChange {
    pub event: AuthChangeEvent,
    pub session: Option<Session>,
}

impl AuthStateChange {
    pub fn new(event: AuthChangeEvent, session: Option<Session>) -> Self {
        Self { event, session }
    }

    pub fn signed_out() -> Self {
        Self::new(AuthChangeEvent::SignedOut, None)
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }
}

/// Sending half, shared by clones of a provider.
#[derive(Debug, Clone)]
pub struct AuthEvents {
    tx: broadcast::Sender<AuthStateChange>,
}

impl Default for AuthEvents {
    fn default() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }
}

impl AuthEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish to every current subscriber. Without subscribers this is a no-op.
    pub fn emit(&self, change: AuthStateChange) {
        tracing::debug!(event = ?change.event, signed_in = change.session.is_some(), "auth state change");
        let _ = self.tx.send(change);
    }

    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// Listener registration. Unsubscribes when dropped.
#[derive(Debug)]
pub struct AuthSubscription {
    rx: broadcast::Receiver<AuthStateChange>,
}

impl AuthSubscription {
    /// Wait for the next notification. `None` once the provider is gone.
    pub async fn next(&mut self) -> Option<AuthStateChange> {
        loop {
            match self.rx.recv().await {
                Ok(change) => return Some(change),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "auth listener lagged behind");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Take a notification that is already queued, without waiting.
    pub fn try_next(&mut self) -> Option<AuthStateChange> {
        loop {
            match self.rx.try_recv() {
                Ok(change) => return Some(change),
                Err(broadcast::error::TryRecvError::Lagged(_)) => continue,
                Err(_) => return None,
            }
        }
    }

    pub fn unsubscribe(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscribers_receive_in_order() {
        let events = AuthEvents::new();
        let mut sub = events.subscribe();

        events.emit(AuthStateChange::new(AuthChangeEvent::InitialSession, None));
        events.emit(AuthStateChange::signed_out());

        assert_eq!(sub.next().await.unwrap().event, AuthChangeEvent::InitialSession);
        assert_eq!(sub.next().await.unwrap().event, AuthChangeEvent::SignedOut);
        assert!(sub.try_next().is_none());
    }

    #[test]
    fn test_drop_unsubscribes() {
        let events = AuthEvents::new();
        let first = events.subscribe();
        let second = events.subscribe();
        assert_eq!(events.subscriber_count(), 2);

        drop(first);
        assert_eq!(events.subscriber_count(), 1);
        second.unsubscribe();
        assert_eq!(events.subscriber_count(), 0);

        // emitting without listeners is fine
        events.emit(AuthStateChange::signed_out());
    }

    #[tokio::test]
    async fn test_closed_channel_ends_subscription() {
        let events = AuthEvents::new();
        let mut sub = events.subscribe();
        drop(events);
        assert!(sub.next().await.is_none());
    }

    #[test]
    fn test_lagged_listener_keeps_newest() {
        let events = AuthEvents::new();
        let mut sub = events.subscribe();
        for _ in 0..(CHANNEL_CAPACITY + 4) {
            events.emit(AuthStateChange::new(AuthChangeEvent::TokenRefreshed, None));
        }
        events.emit(AuthStateChange::signed_out());

        let mut last = None;
        while let Some(change) = sub.try_next() {
            last = Some(change);
        }
        assert_eq!(last.map(|c| c.event), Some(AuthChangeEvent::SignedOut));
    }
}
