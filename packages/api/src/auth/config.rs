//! Hosted auth configuration from environment variables.
//!
//! Native builds read `.env` / the process environment at runtime. WASM builds
//! have no environment, so the same variables are baked in at compile time.

use crate::error::AuthError;

const URL_VAR: &str = "POLECHECK_AUTH_URL";
const ANON_KEY_VAR: &str = "POLECHECK_AUTH_ANON_KEY";
const REDIRECT_VAR: &str = "POLECHECK_AUTH_REDIRECT";

/// Where the hosted auth service lives and how to call it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`.
    pub url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
    /// Where confirmation links send the user after sign-up.
    pub redirect_to: Option<String>,
}

impl AuthConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            redirect_to: None,
        }
    }

    pub fn with_redirect_to(mut self, redirect_to: impl Into<String>) -> Self {
        self.redirect_to = Some(redirect_to.into());
        self
    }

    /// Load from `POLECHECK_AUTH_URL`, `POLECHECK_AUTH_ANON_KEY` and the optional
    /// `POLECHECK_AUTH_REDIRECT`.
    pub fn from_env() -> Result<Self, AuthError> {
        let url = lookup(URL_VAR).ok_or_else(|| not_set(URL_VAR))?;
        let anon_key = lookup(ANON_KEY_VAR).ok_or_else(|| not_set(ANON_KEY_VAR))?;
        Ok(Self {
            url,
            anon_key,
            redirect_to: lookup(REDIRECT_VAR),
        })
    }

    /// Full URL of an auth endpoint, e.g. `endpoint("/token")`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.url.trim_end_matches('/'), path)
    }
}

fn not_set(var: &str) -> AuthError {
    AuthError::NotConfigured(format!("{var} not set"))
}

#[cfg(not(target_arch = "wasm32"))]
fn lookup(var: &str) -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(target_arch = "wasm32")]
fn lookup(var: &str) -> Option<String> {
    let value = match var {
        URL_VAR => option_env!("POLECHECK_AUTH_URL"),
        ANON_KEY_VAR => option_env!("POLECHECK_AUTH_ANON_KEY"),
        REDIRECT_VAR => option_env!("POLECHECK_AUTH_REDIRECT"),
        _ => None,
    };
    value.map(str::to_string).filter(|v| !v.trim().is_empty())
}
