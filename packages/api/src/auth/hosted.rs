//! # Hosted auth client: Supabase Auth (GoTrue) REST API
//!
//! [`HostedAuth`] talks to the hosted auth service over HTTPS with `reqwest`
//! and keeps the resulting session in memory. Every request carries the
//! project's anon key in the `apikey` header.
//!
//! | Operation | Request |
//! |-----------|---------|
//! | sign-up | `POST /auth/v1/signup?redirect_to=…` with `{email, password}` |
//! | sign-in | `POST /auth/v1/token?grant_type=password` with `{email, password}` |
//! | refresh | `POST /auth/v1/token?grant_type=refresh_token` with `{refresh_token}` |
//! | sign-out | `POST /auth/v1/logout` with the user's bearer token |
//!
//! Sign-up answers with a session when the project auto-confirms emails and
//! with a bare user otherwise; both shapes are accepted.
//!
//! Every stored or cleared session is published on the event channel. Sign-out
//! clears the local session and notifies before contacting the service, so a
//! failed remote logout never leaves the UI signed in.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::config::AuthConfig;
use super::events::{AuthChangeEvent, AuthEvents, AuthStateChange, AuthSubscription};
use super::{AuthProvider, MIN_PASSWORD_LENGTH};
use crate::error::AuthError;
use crate::models::{AuthResponse, Session, User};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Serialize)]
struct Empty {}

/// Sign-up response: a session if auto-confirmed, else the pending user.
#[derive(Deserialize)]
#[serde(untagged)]
enum SignUpBody {
    Session(Session),
    User(User),
}

/// Error payload; the service has used several field names over time.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    msg: Option<String>,
    message: Option<String>,
    error_description: Option<String>,
    error: Option<String>,
    error_code: Option<String>,
}

/// Client for the hosted auth service.
#[derive(Clone, Debug)]
pub struct HostedAuth {
    config: AuthConfig,
    http: reqwest::Client,
    session: Arc<Mutex<Option<Session>>>,
    events: AuthEvents,
}

impl HostedAuth {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            session: Arc::default(),
            events: AuthEvents::new(),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        bearer: Option<&str>,
        body: &B,
    ) -> Result<reqwest::Response, AuthError> {
        let mut request = self
            .http
            .post(self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
            .query(query)
            .json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(error_from_body(status.as_u16(), &text))
    }

    fn store(&self, session: Session, event: AuthChangeEvent) -> Session {
        let session = session.stamped(Utc::now().timestamp());
        *self.slot() = Some(session.clone());
        self.events
            .emit(AuthStateChange::new(event, Some(session.clone())));
        session
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let response = self
            .post(
                "/token",
                &[("grant_type", "refresh_token")],
                None,
                &RefreshRequest { refresh_token },
            )
            .await?;
        Ok(response.json::<Session>().await?)
    }
}

impl AuthProvider for HostedAuth {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let current = self.slot().clone();
        let Some(session) = current else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }

        tracing::debug!("session expired, refreshing");
        match self.refresh(&session.refresh_token).await {
            Ok(fresh) => Ok(Some(self.store(fresh, AuthChangeEvent::TokenRefreshed))),
            Err(e) => {
                *self.slot() = None;
                self.events.emit(AuthStateChange::signed_out());
                Err(e)
            }
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        redirect_to: Option<&str>,
    ) -> Result<AuthResponse, AuthError> {
        let query: Vec<(&str, &str)> = redirect_to.map(|r| ("redirect_to", r)).into_iter().collect();
        let response = self
            .post("/signup", &query, None, &Credentials { email, password })
            .await?;

        match response.json::<SignUpBody>().await? {
            SignUpBody::Session(session) => {
                let session = self.store(session, AuthChangeEvent::SignedIn);
                Ok(AuthResponse {
                    user: Some(session.user.clone()),
                    session: Some(session),
                })
            }
            SignUpBody::User(user) => Ok(AuthResponse {
                user: Some(user),
                session: None,
            }),
        }
    }

    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, AuthError> {
        let response = self
            .post(
                "/token",
                &[("grant_type", "password")],
                None,
                &Credentials { email, password },
            )
            .await?;
        let session = self.store(response.json::<Session>().await?, AuthChangeEvent::SignedIn);
        Ok(AuthResponse {
            user: Some(session.user.clone()),
            session: Some(session),
        })
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let Some(session) = self.slot().take() else {
            return Ok(());
        };
        self.events.emit(AuthStateChange::signed_out());

        match self
            .post("/logout", &[], Some(&session.access_token), &Empty {})
            .await
        {
            Ok(_) => Ok(()),
            // the token was already invalid remotely
            Err(AuthError::Api {
                status: 401 | 403 | 404,
                ..
            })
            | Err(AuthError::SessionMissing) => Ok(()),
            Err(e) => Err(e),
        }
    }

    fn on_auth_state_change(&self) -> AuthSubscription {
        self.events.subscribe()
    }
}

fn error_from_body(status: u16, body: &str) -> AuthError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .msg
        .or(parsed.message)
        .or(parsed.error_description)
        .or(parsed.error)
        .unwrap_or_else(|| format!("Auth request failed with status {status}"));

    match parsed.error_code.as_deref() {
        Some("weak_password") => AuthError::WeakPassword {
            min_length: MIN_PASSWORD_LENGTH,
        },
        Some("user_already_exists" | "email_exists") => AuthError::UserAlreadyExists,
        Some("invalid_credentials") => AuthError::InvalidCredentials,
        Some("email_not_confirmed") => AuthError::EmailNotConfirmed,
        Some("email_address_invalid") => AuthError::InvalidEmail,
        Some("session_not_found") => AuthError::SessionMissing,
        _ => match message.as_str() {
            "Invalid login credentials" => AuthError::InvalidCredentials,
            "User already registered" => AuthError::UserAlreadyExists,
            "Email not confirmed" => AuthError::EmailNotConfirmed,
            m if m.starts_with("Password should be at least") => AuthError::WeakPassword {
                min_length: MIN_PASSWORD_LENGTH,
            },
            m if m.starts_with("Unable to validate email address") => AuthError::InvalidEmail,
            _ => AuthError::Api { status, message },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_map_to_variants() {
        assert_eq!(
            error_from_body(422, r#"{"code":422,"error_code":"weak_password","msg":"Password should be at least 6 characters."}"#),
            AuthError::WeakPassword { min_length: 6 }
        );
        assert_eq!(
            error_from_body(422, r#"{"code":422,"error_code":"user_already_exists","msg":"User already registered"}"#),
            AuthError::UserAlreadyExists
        );
        assert_eq!(
            error_from_body(400, r#"{"code":400,"error_code":"invalid_credentials","msg":"Invalid login credentials"}"#),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            error_from_body(400, r#"{"error_code":"email_address_invalid","msg":"Email address is invalid"}"#),
            AuthError::InvalidEmail
        );
    }

    #[test]
    fn test_legacy_error_bodies_map_by_message() {
        assert_eq!(
            error_from_body(400, r#"{"error":"invalid_grant","error_description":"Invalid login credentials"}"#),
            AuthError::InvalidCredentials
        );
        assert_eq!(
            error_from_body(400, r#"{"error":"invalid_grant","error_description":"Email not confirmed"}"#),
            AuthError::EmailNotConfirmed
        );
        assert_eq!(
            error_from_body(422, r#"{"msg":"Unable to validate email address: invalid format"}"#),
            AuthError::InvalidEmail
        );
    }

    #[test]
    fn test_unknown_errors_keep_status_and_message() {
        assert_eq!(
            error_from_body(429, r#"{"msg":"Email rate limit exceeded"}"#),
            AuthError::Api {
                status: 429,
                message: "Email rate limit exceeded".to_string()
            }
        );
        let err = error_from_body(502, "<html>bad gateway</html>");
        assert_eq!(err.to_string(), "Auth request failed with status 502");
    }

    #[test]
    fn test_sign_up_body_accepts_both_shapes() {
        let with_session: SignUpBody = serde_json::from_str(
            r#"{"access_token":"jwt","token_type":"bearer","expires_in":3600,
                "refresh_token":"rt","user":{"id":"u1","email":"tech@example.com"}}"#,
        )
        .unwrap();
        assert!(matches!(with_session, SignUpBody::Session(s) if s.user.id == "u1"));

        let pending: SignUpBody = serde_json::from_str(
            r#"{"id":"u2","email":"tech@example.com","confirmation_sent_at":"2024-08-15T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(matches!(pending, SignUpBody::User(u) if !u.is_confirmed()));
    }

    #[tokio::test]
    async fn test_sign_out_without_session_makes_no_request() {
        // unroutable URL: any request would fail with a transport error
        let auth = HostedAuth::new(AuthConfig::new("http://127.0.0.1:9", "anon"));
        let mut sub = auth.on_auth_state_change();
        assert_eq!(auth.sign_out().await, Ok(()));
        assert_eq!(auth.get_session().await, Ok(None));
        assert!(sub.try_next().is_none());
    }

    fn expired_session() -> Session {
        Session {
            access_token: "jwt".into(),
            token_type: "bearer".into(),
            expires_in: 3600,
            expires_at: Some(Utc::now().timestamp() - 60),
            refresh_token: "rt".into(),
            user: User {
                id: "u1".into(),
                email: "tech@example.com".into(),
                email_confirmed_at: None,
            },
        }
    }

    #[tokio::test]
    async fn test_failed_refresh_signs_out() {
        let auth = HostedAuth::new(AuthConfig::new("http://127.0.0.1:9", "anon"));
        let mut sub = auth.on_auth_state_change();
        auth.store(expired_session(), AuthChangeEvent::SignedIn);
        assert_eq!(sub.next().await.map(|c| c.event), Some(AuthChangeEvent::SignedIn));

        let result = auth.get_session().await;
        assert!(matches!(result, Err(AuthError::Transport(_))));
        assert!(auth.slot().is_none());

        let change = sub.next().await.unwrap();
        assert_eq!(change.event, AuthChangeEvent::SignedOut);
        assert!(change.session.is_none());
    }

    #[tokio::test]
    async fn test_session_check_drops_expired_session() {
        let auth = HostedAuth::new(AuthConfig::new("http://127.0.0.1:9", "anon"));
        let store = crate::SessionStore::new(auth.clone());
        let mut sub = store.subscribe();
        store.load().await;
        auth.store(expired_session(), AuthChangeEvent::SignedIn);
        assert!(store.apply(&sub.next().await.unwrap()).is_signed_in());

        store.check_session().await;
        let state = store.apply(&sub.next().await.unwrap());
        assert!(!state.is_signed_in());
        assert!(state.user.is_none());
    }
}
