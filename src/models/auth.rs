//! Wire types for the `/auth` endpoints.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

use super::user::{Role, UserRecord};

/// E-mail/password credentials. Never persisted.
#[derive(Clone, Serialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body for `POST /auth/oauth2/{provider}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthRequest {
    /// Opaque provider token; never inspected by the client.
    pub token: String,
    pub user_type: Role,
}

/// Third-party identity providers accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    LinkedIn,
}

impl OAuthProvider {
    /// Path segment under `/auth/oauth2/`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::LinkedIn => "linkedin",
        }
    }
}

impl fmt::Display for OAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `data` of a successful auth response.
///
/// Accepts both `{"user": {...}, "token": "..."}` and a bare user record
/// (optionally carrying its own `token` field).
#[derive(Debug, Clone, PartialEq)]
pub struct AuthPayload {
    pub user: UserRecord,
    pub token: Option<String>,
}

impl<'de> Deserialize<'de> for AuthPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut value = serde_json::Value::deserialize(deserializer)?;
        let token = value
            .get("token")
            .and_then(serde_json::Value::as_str)
            .filter(|t| !t.is_empty())
            .map(str::to_owned);
        let nested = value.get_mut("user").map(serde_json::Value::take);
        let user = serde_json::from_value(nested.unwrap_or(value)).map_err(de::Error::custom)?;
        Ok(Self { user, token })
    }
}
