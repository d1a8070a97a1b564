//! The authenticated actor and the login exchange payloads.

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use infradesk_core::AppError;
use infradesk_core::types::UserId;

use crate::user::{UserRole, UserStatus};

/// Login name and password submitted to `POST /login/`.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl Credentials {
    /// Create credentials.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of a successful `POST /login/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// Body of `GET /me/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: Profile,
}

/// The caller's profile as returned by `/me/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: UserId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

/// The authenticated actor: identity, role, and bearer credential.
///
/// A `Session` is always complete. It is only built by
/// [`Session::from_login`], which refuses an empty token, so consumers
/// never observe a half-populated session.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: UserId,
    pub username: String,
    pub token: String,
    pub role: UserRole,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub status: UserStatus,
}

impl Session {
    /// Compose a session from the two halves of the login exchange.
    pub fn from_login(
        username: impl Into<String>,
        token: impl Into<String>,
        profile: Profile,
    ) -> Result<Self, AppError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(AppError::authentication(
                "Login failed: the server returned an empty access token.",
            ));
        }

        Ok(Self {
            id: profile.id,
            username: username.into(),
            token,
            role: profile.role,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            status: profile.status,
        })
    }

    /// Whether a persisted session is usable as-is.
    pub fn is_complete(&self) -> bool {
        !self.token.trim().is_empty() && !self.username.is_empty()
    }

    /// First and last name, falling back to the login name.
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name, self.last_name);
        let full = full.trim();
        if full.is_empty() {
            self.username.clone()
        } else {
            full.to_string()
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .field("role", &self.role)
            .field("status", &self.status)
            .finish()
    }
}
