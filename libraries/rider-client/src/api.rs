//! Remote API seams used by the entity stores.
//!
//! The stores only depend on these traits, so they can run against the real
//! [`RiderClient`](crate::RiderClient) or against a test double.

use crate::error::Result;
use crate::types::{TripFilter, UserPatch};
use async_trait::async_trait;
use rider_core::{NewTrip, NewUser, Trip, TripId, User, UserId};

/// Remote user operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn get_user(&self, user_id: UserId) -> Result<User>;

    async fn create_user(&self, user: &NewUser) -> Result<User>;

    /// Partial update leaving the password untouched
    async fn patch_user(&self, user_id: UserId, patch: &UserPatch) -> Result<User>;

    /// Full replacement including the password
    async fn put_user(&self, user: &User) -> Result<User>;

    async fn delete_user(&self, user_id: UserId) -> Result<()>;
}

/// Remote trip operations, scoped by owning user
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TripsApi: Send + Sync {
    async fn list_trips(&self, user_id: UserId, filter: &TripFilter) -> Result<Vec<Trip>>;

    async fn get_trip(&self, user_id: UserId, trip_id: TripId) -> Result<Trip>;

    async fn create_trip(&self, user_id: UserId, trip: &NewTrip) -> Result<Trip>;

    async fn update_trip(&self, user_id: UserId, trip: &Trip) -> Result<Trip>;

    async fn delete_trip(&self, user_id: UserId, trip_id: TripId) -> Result<()>;
}
