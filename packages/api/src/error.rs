//! Errors reported by an auth provider.
//!
//! Every variant renders as a message fit to show inline under the form that
//! triggered it.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Unable to validate email address: invalid format")]
    InvalidEmail,
    #[error("Password should be at least {min_length} characters.")]
    WeakPassword { min_length: usize },
    #[error("User already registered")]
    UserAlreadyExists,
    #[error("Invalid login credentials")]
    InvalidCredentials,
    #[error("Email not confirmed")]
    EmailNotConfirmed,
    #[error("Auth session missing!")]
    SessionMissing,
    #[error("Auth is not configured: {0}")]
    NotConfigured(String),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Network error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(e: reqwest::Error) -> Self {
        AuthError::Transport(e.to_string())
    }
}
