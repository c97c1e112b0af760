//! # API crate: authentication for Polecheck
//!
//! Everything the frontends need to know about who is signed in. The survey
//! itself lives in the `survey` crate and never touches the network.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`auth`] | The [`AuthProvider`](auth::AuthProvider) trait, the hosted GoTrue client, the in-memory provider, the change-notification channel, and backend selection |
//! | [`error`] | [`AuthError`], the messages shown under the auth forms |
//! | [`models`] | [`User`], [`Session`] and [`AuthResponse`] as the provider returns them |
//! | [`session_store`] | [`SessionStore`], the single owner of the current session |
//!
//! ## Flow
//!
//! 1. [`connect`] picks the hosted provider when `POLECHECK_AUTH_URL` and
//!    `POLECHECK_AUTH_ANON_KEY` are set and in-memory accounts otherwise.
//! 2. The UI subscribes, then calls [`SessionStore::load`] once.
//! 3. Form submissions call `sign_up` / `sign_in` / `sign_out`. Their results
//!    only drive form feedback; the notification that follows is what changes
//!    the session.

pub mod auth;
pub mod error;
pub mod models;
pub mod session_store;

pub use auth::{connect, AuthBackend, AuthProvider, MemoryAuth};
pub use error::AuthError;
pub use models::{AuthResponse, Session, User};
pub use session_store::{SessionState, SessionStore};

/// The session store the apps run on.
pub type Sessions = SessionStore<AuthBackend>;
