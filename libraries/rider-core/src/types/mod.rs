//! Core domain types for Easy Rider

pub mod ids;
pub mod role;
pub mod trip;
pub mod user;

pub use ids::{TripId, UserId};
pub use role::Role;
pub use trip::{NewTrip, Trip};
pub use user::{CurrentUser, NewUser, User, PASSWORD_PLACEHOLDER};
