//! Session state: who, if anyone, is signed in.

use crate::types::{CurrentUser, Role, UserId};

/// Authentication state of the client.
///
/// A session is either anonymous or holds the signed-in user's record as
/// reported by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<CurrentUser>,
}

impl Session {
    /// An anonymous session
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session for a signed-in user
    pub fn signed_in(user: CurrentUser) -> Self {
        Self { user: Some(user) }
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user.as_ref().map(|u| u.id)
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    /// Replace the signed-in user
    pub fn set_user(&mut self, user: CurrentUser) {
        self.user = Some(user);
    }

    /// Forget the signed-in user
    pub fn clear(&mut self) {
        self.user = None;
    }
}
