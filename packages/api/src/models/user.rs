//! # User model for authenticated users
//!
//! [`User`] is the identity record the auth provider attaches to every session.
//! It is read-only to the rest of the application: the provider creates it at
//! sign-up and returns it again with each session.
//!
//! - `id`: provider-assigned identifier (a UUID for the hosted provider).
//! - `email`: the address the account was registered with, lowercased.
//! - `email_confirmed_at`: set once the address is confirmed; `None` while the
//!   provider is waiting on a confirmation link.
//!
//! The hosted provider returns many more fields; unknown fields are ignored on
//! deserialization.

use serde::{Deserialize, Serialize};

/// Identity record associated with an active session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email_confirmed_at: Option<String>,
}

impl User {
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}
