//! Identifier types
//!
//! The backend assigns integer primary keys to every entity.

/// Identifier of a user account
pub type UserId = i64;

/// Identifier of a trip
pub type TripId = i64;
