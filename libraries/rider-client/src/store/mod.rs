//! In-memory entity stores synchronized with the API.
//!
//! Each store keeps the last-synchronized copy of the records it has seen.
//! Every operation goes to the server first and only touches the local
//! mapping once the server call succeeded, so a failed call leaves the store
//! exactly as it was. There is no versioning: whichever response lands last
//! owns the slot.
//!
//! Locks are never held across a network call. Two concurrent `retrieve`s of
//! the same missing id both hit the server.

pub mod trips;
pub mod users;

pub use trips::TripStore;
pub use users::UserStore;
