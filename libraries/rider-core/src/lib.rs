//! Easy Rider Core
//!
//! Platform-agnostic domain types, session state, UI preferences, access
//! guard and form validation for the Easy Rider trip booking client.
//!
//! This crate has no networking; the HTTP client and the entity stores that
//! synchronize with the backend live in `rider-client`.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User`, `Trip`, `Role`, `CurrentUser`
//! - **Session & Preferences**: who is signed in, and how the UI is configured
//! - **Access Guard**: the navigation predicate for privileged areas
//! - **Error Handling**: Unified `RiderError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use rider_core::guard::{Navigation, PrivilegedGuard};
//! use rider_core::session::Session;
//! use rider_core::types::{CurrentUser, Role};
//!
//! let guard = PrivilegedGuard::default();
//!
//! let session = Session::signed_in(CurrentUser::new(7, "rider@example.com", Role::User));
//! assert_eq!(
//!     guard.check(&session),
//!     Navigation::Redirect("/users/7/trips".to_string())
//! );
//! ```

#![forbid(unsafe_code)]

pub mod date;
pub mod error;
pub mod guard;
pub mod preferences;
pub mod session;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{Result, RiderError};
pub use guard::{Navigation, PrivilegedGuard, RedirectConfig};
pub use preferences::{CalendarLabels, Preferences, RoleOption};
pub use session::Session;

// Export all types
pub use types::{
    CurrentUser, NewTrip, NewUser, Role, Trip, TripId, User, UserId, PASSWORD_PLACEHOLDER,
};
