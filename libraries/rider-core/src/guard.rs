//! Access guard for privileged areas.
//!
//! The guard is evaluated once before entering a protected area (the user
//! management screens, or the `users` CLI commands). It never errors: the
//! only outcomes are "go ahead" or "go somewhere else instead".

use crate::session::Session;
use crate::types::Role;
use serde::{Deserialize, Serialize};

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Continue to the requested destination
    Allow,
    /// Go to this path instead
    Redirect(String),
}

impl Navigation {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Where denied navigations are sent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectConfig {
    /// Destination when nobody is signed in
    #[serde(default = "default_sign_in")]
    pub sign_in: String,

    /// Destination for signed-in users below the threshold.
    /// `{id}` is replaced with the user's id.
    #[serde(default = "default_own_trips")]
    pub own_trips: String,
}

fn default_sign_in() -> String {
    "/account/signin".to_string()
}

fn default_own_trips() -> String {
    "/users/{id}/trips".to_string()
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            sign_in: default_sign_in(),
            own_trips: default_own_trips(),
        }
    }
}

/// Guard admitting only users at or above a role threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrivilegedGuard {
    redirects: RedirectConfig,
    threshold: Role,
}

impl Default for PrivilegedGuard {
    fn default() -> Self {
        Self::new(RedirectConfig::default())
    }
}

impl PrivilegedGuard {
    /// Guard requiring at least `Role::Manager`
    pub fn new(redirects: RedirectConfig) -> Self {
        Self {
            redirects,
            threshold: Role::Manager,
        }
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: Role) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn redirects(&self) -> &RedirectConfig {
        &self.redirects
    }

    /// Decide whether the session may enter the protected area
    pub fn check(&self, session: &Session) -> Navigation {
        let Some(user) = session.user() else {
            return Navigation::Redirect(self.redirects.sign_in.clone());
        };

        if user.role < self.threshold {
            return Navigation::Redirect(
                self.redirects
                    .own_trips
                    .replace("{id}", &user.id.to_string()),
            );
        }

        Navigation::Allow
    }
}
