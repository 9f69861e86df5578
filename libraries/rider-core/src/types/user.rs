/// User domain types
use super::{Role, UserId};
use serde::{Deserialize, Serialize};

/// Password value held by every cached user.
///
/// The client never knows a user's real password. Cached records carry this
/// marker instead, and an update whose password still equals it is treated
/// as "password unchanged".
pub const PASSWORD_PLACEHOLDER: &str = "dummy";

/// A user account as cached by the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    pub password: String,
}

impl User {
    /// Create a user record carrying the password placeholder
    pub fn new(id: UserId, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
            password: PASSWORD_PLACEHOLDER.to_string(),
        }
    }

    /// Replace whatever password the record holds with the placeholder
    #[must_use]
    pub fn with_masked_password(mut self) -> Self {
        self.password = PASSWORD_PLACEHOLDER.to_string();
        self
    }

    /// Whether the password field still holds the placeholder
    pub fn password_unchanged(&self) -> bool {
        self.password == PASSWORD_PLACEHOLDER
    }
}

/// Data for creating a new user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            role,
        }
    }
}

/// The signed-in user, as reported by the authentication endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn new(id: UserId, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            role,
        }
    }
}
