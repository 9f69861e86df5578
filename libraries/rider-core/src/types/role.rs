/// Account roles
use crate::error::RiderError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a user account.
///
/// The backend stores roles as the integers 1, 2 and 4. They look like bit
/// flags but every account holds exactly one of them, and they are ordered
/// `User < Manager < Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    User = 1,
    Manager = 2,
    Admin = 4,
}

impl Role {
    /// All roles, lowest first.
    pub const ALL: [Role; 3] = [Role::User, Role::Manager, Role::Admin];

    /// Wire value of the role
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self as i64
    }

    /// Display label, as shown in role pickers
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Manager => "MANAGER",
            Self::Admin => "ADMIN",
        }
    }

    /// Whether this role may manage other accounts
    pub fn is_privileged(self) -> bool {
        matches!(self, Self::Manager | Self::Admin)
    }

    /// Roles that an account with this role may hand out to others.
    ///
    /// Plain users cannot assign any role; managers can create users and
    /// other managers; admins can assign every role.
    pub fn assignable(self) -> &'static [Role] {
        match self {
            Self::User => &[],
            Self::Manager => &[Role::User, Role::Manager],
            Self::Admin => &Self::ALL,
        }
    }
}

impl TryFrom<i64> for Role {
    type Error = RiderError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::User),
            2 => Ok(Self::Manager),
            4 => Ok(Self::Admin),
            other => Err(RiderError::InvalidRole(other)),
        }
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.as_i64()
    }
}

impl std::str::FromStr for Role {
    type Err = RiderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "USER" | "1" => Ok(Self::User),
            "MANAGER" | "2" => Ok(Self::Manager),
            "ADMIN" | "4" => Ok(Self::Admin),
            _ => Err(RiderError::invalid_input(format!("unknown role '{}'", s))),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
