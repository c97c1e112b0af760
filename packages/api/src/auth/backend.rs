//! Backend selection.
//!
//! [`connect`] builds the session store the UI runs on:
//! - **Configured** (`POLECHECK_AUTH_URL` + `POLECHECK_AUTH_ANON_KEY` set): the
//!   hosted service via [`HostedAuth`].
//! - **Unconfigured**: in-process accounts via [`MemoryAuth`], which last until
//!   the page reloads.

use super::config::AuthConfig;
use super::events::AuthSubscription;
use super::hosted::HostedAuth;
use super::memory::MemoryAuth;
use super::AuthProvider;
use crate::error::AuthError;
use crate::models::{AuthResponse, Session};
use crate::session_store::SessionStore;

/// The provider chosen at startup.
#[derive(Clone, Debug)]
pub enum AuthBackend {
    Hosted(HostedAuth),
    Memory(MemoryAuth),
}

impl AuthBackend {
    pub fn from_config(config: Result<AuthConfig, AuthError>) -> Self {
        match config {
            Ok(config) => {
                tracing::info!(url = %config.url, "using hosted auth");
                AuthBackend::Hosted(HostedAuth::new(config))
            }
            Err(e) => {
                tracing::warn!("{e}; falling back to in-memory accounts");
                AuthBackend::Memory(MemoryAuth::new())
            }
        }
    }

    pub fn redirect_to(&self) -> Option<&str> {
        match self {
            AuthBackend::Hosted(hosted) => hosted.config().redirect_to.as_deref(),
            AuthBackend::Memory(_) => None,
        }
    }
}

/// Session store over the backend configured in the environment.
pub fn connect() -> SessionStore<AuthBackend> {
    let backend = AuthBackend::from_config(AuthConfig::from_env());
    let redirect_to = backend.redirect_to().map(str::to_string);
    let store = SessionStore::new(backend);
    match redirect_to {
        Some(redirect_to) => store.with_redirect_to(redirect_to),
        None => store,
    }
}

impl AuthProvider for AuthBackend {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        match self {
            AuthBackend::Hosted(p) => p.get_session().await,
            AuthBackend::Memory(p) => p.get_session().await,
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: Option<&str>,
    ) -> Result<AuthResponse, AuthError> {
        match self {
            AuthBackend::Hosted(p) => p.sign_up(email, password, redirect_to).await,
            AuthBackend::Memory(p) => p.sign_up(email, password, redirect_to).await,
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        match self {
            AuthBackend::Hosted(p) => p.sign_in_with_password(email, password).await,
            AuthBackend::Memory(p) => p.sign_in_with_password(email, password).await,
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        match self {
            AuthBackend::Hosted(p) => p.sign_out().await,
            AuthBackend::Memory(p) => p.sign_out().await,
        }
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        match self {
            AuthBackend::Hosted(p) => p.on_auth_state_change(),
            AuthBackend::Memory(p) => p.on_auth_state_change(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_falls_back_to_memory() {
        let backend =
            AuthBackend::from_config(Err(AuthError::NotConfigured("POLECHECK_AUTH_URL not set".into())));
        assert!(matches!(backend, AuthBackend::Memory(_)));
        assert!(backend.redirect_to().is_none());
    }

    #[test]
    fn test_config_selects_hosted() {
        let config = AuthConfig::new("https://demo.supabase.co", "anon")
            .with_redirect_to("http://localhost:8080");
        let backend = AuthBackend::from_config(Ok(config));
        assert!(matches!(backend, AuthBackend::Hosted(_)));
        assert_eq!(backend.redirect_to(), Some("http://localhost:8080"));
    }

    #[tokio::test]
    async fn test_backend_delegates_to_memory() {
        let backend = AuthBackend::Memory(MemoryAuth::new());
        let mut sub = backend.on_auth_state_change();
        backend
            .sign_up("tech@example.com", "secret1", None)
            .await
            .unwrap();
        assert!(sub.next().await.unwrap().session.is_some());
        assert!(backend.get_session().await.unwrap().is_some());
    }
}
