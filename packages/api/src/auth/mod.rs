//! Authentication against a hosted provider, plus an in-memory stand-in.

use std::future::Future;

use crate::error::AuthError;
use crate::models::{AuthResponse, Session};

mod backend;
mod config;
mod events;
mod hosted;
mod memory;
mod password;

pub use backend::{connect, AuthBackend};
pub use config::AuthConfig;
pub use events::{AuthChangeEvent, AuthEvents, AuthStateChange, AuthSubscription};
pub use hosted::HostedAuth;
pub use memory::MemoryAuth;
pub use password::{hash_password, verify_password};

/// Minimum password length enforced at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Async interface of an email/password auth provider.
///
/// Implementations publish every session change on their event channel,
/// including changes caused by their own `sign_*` calls.
pub trait AuthProvider {
    /// The provider's current session, refreshed if it had expired.
    fn get_session(&self) -> impl Future<Output = Result<Option<Session>, AuthError>>;

    fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: Option<&str>,
    ) -> impl Future<Output = Result<AuthResponse, AuthError>>;

    fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthResponse, AuthError>>;

    /// Signing out without a session succeeds.
    fn sign_out(&self) -> impl Future<Output = Result<(), AuthError>>;

    fn on_auth_state_change(&self) -> AuthSubscription;
}
