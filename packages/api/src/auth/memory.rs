use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{SecondsFormat, Utc};

use super::events::{AuthChangeEvent, AuthEvents, AuthStateChange, AuthSubscription};
use super::password::{hash_password, verify_password};
use super::{AuthProvider, MIN_PASSWORD_LENGTH};
use crate::error::AuthError;
use crate::models::{AuthResponse, Session, User};

const SESSION_LIFETIME_SECS: i64 = 3600;

/// In-process auth provider for tests and unconfigured deployments.
///
/// Enforces the same rules as the hosted service: email shape, minimum
/// password length, unique accounts. With [`with_email_confirmation`] sign-up
/// returns a user without a session until [`confirm_email`] is called.
///
/// [`with_email_confirmation`]: MemoryAuth::with_email_confirmation
/// [`confirm_email`]: MemoryAuth::confirm_email
#[derive(Clone, Debug, Default)]
pub struct MemoryAuth {
    state: Arc<Mutex<MemoryState>>,
    events: AuthEvents,
    require_confirmation: bool,
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: HashMap<String, Account>,
    session: Option<Session>,
}

#[derive(Debug)]
struct Account {
    user: User,
    password_hash: String,
}

impl MemoryAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_email_confirmation(mut self) -> Self {
        self.require_confirmation = true;
        self
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publish a change as if it happened elsewhere (another tab, an admin).
    pub fn notify(&self, change: AuthStateChange) {
        self.state().session = change.session.clone();
        self.events.emit(change);
    }

    /// Mark an account's email as confirmed.
    pub fn confirm_email(&self, email: &str) -> bool {
        let email = normalize_email(email);
        match self.state().accounts.get_mut(&email) {
            Some(account) => {
                account.user.email_confirmed_at = Some(now_rfc3339());
                true
            }
            None => false,
        }
    }

    /// Drop the current session the way a provider-side expiry would.
    pub fn expire_session(&self) {
        let expired = self.state().session.take().is_some();
        if expired {
            self.events.emit(AuthStateChange::signed_out());
        }
    }

    pub fn account_count(&self) -> usize {
        self.state().accounts.len()
    }

    fn start_session(&self, user: User) -> Session {
        let session = issue_session(user);
        self.state().session = Some(session.clone());
        self.events
            .emit(AuthStateChange::new(AuthChangeEvent::SignedIn, Some(session.clone())));
        session
    }
}

impl AuthProvider for MemoryAuth {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        {
            let mut state = self.state();
            let Some(session) = state.session.clone() else {
                return Ok(None);
            };
            if !session.is_expired() {
                return Ok(Some(session));
            }
            state.session = None;
        }
        self.events.emit(AuthStateChange::signed_out());
        Ok(None)
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        _redirect_to: Option<&str>,
    ) -> Result<AuthResponse, AuthError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            });
        }
        if self.state().accounts.contains_key(&email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = hash_password(password).map_err(|message| AuthError::Api {
            status: 500,
            message,
        })?;
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.clone(),
            email_confirmed_at: (!self.require_confirmation).then(now_rfc3339),
        };
        {
            let mut state = self.state();
            if state.accounts.contains_key(&email) {
                return Err(AuthError::UserAlreadyExists);
            }
            state.accounts.insert(
                email,
                Account {
                    user: user.clone(),
                    password_hash,
                },
            );
        }

        if self.require_confirmation {
            return Ok(AuthResponse {
                user: Some(user),
                session: None,
            });
        }
        let session = self.start_session(user.clone());
        Ok(AuthResponse {
            user: Some(user),
            session: Some(session),
        })
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let email = normalize_email(email);
        let (user, hash) = {
            let state = self.state();
            let account = state
                .accounts
                .get(&email)
                .ok_or(AuthError::InvalidCredentials)?;
            (account.user.clone(), account.password_hash.clone())
        };

        let valid = verify_password(password, &hash).map_err(|message| AuthError::Api {
            status: 500,
            message,
        })?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }
        if !user.is_confirmed() {
            return Err(AuthError::EmailNotConfirmed);
        }

        let session = self.start_session(user.clone());
        Ok(AuthResponse {
            user: Some(user),
            session: Some(session),
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let had_session = self.state().session.take().is_some();
        if had_session {
            self.events.emit(AuthStateChange::signed_out());
        }
        Ok(())
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        self.events.subscribe()
    }
}

fn issue_session(user: User) -> Session {
    Session {
        access_token: uuid::Uuid::new_v4().simple().to_string(),
        token_type: "bearer".to_string(),
        expires_in: SESSION_LIFETIME_SECS,
        expires_at: None,
        refresh_token: uuid::Uuid::new_v4().simple().to_string(),
        user,
    }
    .stamped(Utc::now().timestamp())
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// `local@domain.tld`, no whitespace, exactly one `@`.
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}
