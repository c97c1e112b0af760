//! # Session store: the application's view of who is signed in
//!
//! [`SessionStore`] wraps an [`AuthProvider`] and owns the current
//! [`SessionState`]. Only two things write to that state:
//!
//! 1. [`load`](SessionStore::load): the one-time fetch on startup. Until it
//!    finishes, `loading` is `true` and nothing that depends on the session
//!    should render.
//! 2. [`apply`](SessionStore::apply): every provider notification, applied
//!    unconditionally. This is the only path by which sign-in, sign-up and
//!    sign-out change the session; their return values are never used to set it.
//!
//! A notification that arrives while `load` is still waiting on the provider
//! wins: `load` discards its result if any notification was applied after it
//! started.
//!
//! Concurrent `sign_*` calls are not serialised. Whichever completes last
//! produces the last notification, and that notification decides the state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error};

use crate::auth::{AuthProvider, AuthStateChange, AuthSubscription};
use crate::error::AuthError;
use crate::models::{AuthResponse, Session, User};

/// Current session, its user, and whether the startup fetch is still running.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub session: Option<Session>,
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            session: None,
            user: None,
            loading: true,
        }
    }
}

impl SessionState {
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}

#[derive(Debug, Default)]
struct Inner {
    state: SessionState,
    /// Bumped by every applied notification.
    generation: u64,
}

#[derive(Clone, Debug)]
pub struct SessionStore<P> {
    provider: P,
    inner: Arc<Mutex<Inner>>,
    redirect_to: Option<String>,
}

impl<P: AuthProvider> SessionStore<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            inner: Arc::default(),
            redirect_to: None,
        }
    }

    /// Where sign-up confirmation links should send the user.
    pub fn with_redirect_to(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = Some(redirect_to.into());
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> SessionState {
        self.inner().state.clone()
    }

    pub fn current_session(&self) -> Option<Session> {
        self.inner().state.session.clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.inner().state.user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner().state.loading
    }

    /// Fetch the provider's session once and clear the loading flag.
    ///
    /// A failed fetch is logged and leaves the store signed out.
    pub async fn load(&self) -> SessionState {
        let started_at = self.inner().generation;
        let fetched = self.provider.get_session().await;

        let mut inner = self.inner();
        match fetched {
            Ok(session) if inner.generation == started_at => {
                inner.state.user = session.as_ref().map(|s| s.user.clone());
                inner.state.session = session;
            }
            Ok(_) => debug!("auth notification arrived during initial fetch; keeping it"),
            Err(e) => error!("Error fetching session: {e}"),
        }
        inner.state.loading = false;
        inner.state.clone()
    }

    /// Ask the provider for its session again so it can refresh or drop an
    /// expired one. Whatever changes arrives as a notification.
    pub async fn check_session(&self) {
        if let Err(e) = self.provider.get_session().await {
            error!("Error checking session: {e}");
        }
    }

    /// Overwrite local state with a provider notification.
    pub fn apply(&self, change: &AuthStateChange) -> SessionState {
        let mut inner = self.inner();
        inner.generation += 1;
        inner.state.session = change.session.clone();
        inner.state.user = change.user().cloned();
        inner.state.loading = false;
        inner.state.clone()
    }

    /// Register a listener with the provider. Drop it to unsubscribe.
    pub fn subscribe(&self) -> AuthSubscription {
        self.provider.on_auth_state_change()
    }

    /// Apply notifications from `subscription` until the provider goes away,
    /// reporting each resulting state.
    pub async fn listen(
        &self,
        mut subscription: AuthSubscription,
        mut on_change: impl FnMut(SessionState),
    ) {
        while let Some(change) = subscription.next().await {
            debug!(event = ?change.event, "applying auth notification");
            on_change(self.apply(&change));
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        self.provider
            .sign_up(email, password, self.redirect_to.as_deref())
            .await
            .inspect_err(|e| error!("Signup error: {e}"))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthResponse, AuthError> {
        self.provider
            .sign_in_with_password(email, password)
            .await
            .inspect_err(|e| error!("Login error: {e}"))
    }

    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider
            .sign_out()
            .await
            .inspect_err(|e| error!("Logout error: {e}"))
    }
}
