//! Session issued by the auth provider.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::User;

/// Seconds before `expires_at` at which a session is treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 10;

/// Proof of authentication: bearer token, refresh token and expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: i64,
    /// Unix timestamp (seconds). Derived from `expires_in` when the provider omits it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub refresh_token: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl Session {
    /// Fill in `expires_at` relative to `now` if the provider left it out.
    pub fn stamped(mut self, now: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = Some(now + self.expires_in);
        }
        self
    }

    pub fn is_expired_at(&self, now: i64) -> bool {
        match self.expires_at {
            Some(at) => at - EXPIRY_MARGIN_SECS <= now,
            None => false,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

/// What a sign-up or sign-in call returned.
///
/// Never used to set the current session: the state-change notification that
/// accompanies a successful call is the source of truth.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthResponse {
    pub user: Option<User>,
    pub session: Option<Session>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: Option<i64>) -> Session {
        Session {
            access_token: "a".into(),
            token_type: "bearer".into(),
            expires_in: 3600,
            expires_at,
            refresh_token: "r".into(),
            user: User {
                id: "u".into(),
                email: "tech@example.com".into(),
                email_confirmed_at: None,
            },
        }
    }

    #[test]
    fn test_stamped_fills_missing_expiry() {
        assert_eq!(session(None).stamped(1_000).expires_at, Some(4_600));
        assert_eq!(session(Some(7)).stamped(1_000).expires_at, Some(7));
    }

    #[test]
    fn test_expiry_has_margin() {
        let s = session(Some(1_000));
        assert!(!s.is_expired_at(989));
        assert!(s.is_expired_at(990));
        assert!(s.is_expired_at(2_000));
        assert!(!session(None).is_expired_at(i64::MAX));
    }

    #[test]
    fn test_deserialize_provider_payload() {
        let s: Session = serde_json::from_str(
            r#"{
                "access_token": "jwt",
                "token_type": "bearer",
                "expires_in": 3600,
                "expires_at": 1723700000,
                "refresh_token": "rt",
                "user": {"id": "4f1c", "aud": "authenticated", "email": "tech@example.com",
                         "email_confirmed_at": "2024-08-15T10:00:00Z", "role": "authenticated"}
            }"#,
        )
        .unwrap();
        assert_eq!(s.user.email, "tech@example.com");
        assert!(s.user.is_confirmed());
        assert_eq!(s.expires_at, Some(1_723_700_000));
    }
}
