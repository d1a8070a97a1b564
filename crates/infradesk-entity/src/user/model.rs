//! User entity model.

use serde::{Deserialize, Serialize};
use validator::Validate;

use infradesk_core::types::UserId;

use super::role::UserRole;
use super::status::UserStatus;
use crate::resource::Resource;

/// A console account as listed under `/users/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key.
    pub id: UserId,
    /// Unique login name.
    pub username: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Console role.
    pub role: UserRole,
    /// Email address.
    pub email: String,
    /// Account status.
    pub status: UserStatus,
}

impl User {
    /// First and last name joined by a space.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Editable user fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        required(message = "Username is required"),
        length(min = 1, message = "Username is required")
    )]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Role is required"))]
    pub role: Option<UserRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(required(message = "Status is required"))]
    pub status: Option<UserStatus>,
}

impl Resource for User {
    type Id = UserId;
    type Draft = UserDraft;

    const KIND: &'static str = "User";
    const COLLECTION: &'static str = "users";

    fn id(&self) -> UserId {
        self.id
    }

    fn label(&self) -> &str {
        &self.username
    }

    fn subject(&self) -> String {
        format!("\"{}\"", self.full_name())
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            username: Some(self.username.clone()),
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            role: Some(self.role),
            email: Some(self.email.clone()),
            status: Some(self.status),
        }
    }
}
