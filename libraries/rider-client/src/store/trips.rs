//! Trip store

use crate::api::TripsApi;
use crate::error::Result;
use crate::types::TripFilter;
use rider_core::{NewTrip, Trip, TripId, UserId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Cache of trips, grouped by owning user then keyed by trip id.
///
/// Dates are held as calendar dates; conversion to and from the wire format
/// happens at the API boundary, so nothing in here ever sees a date string.
pub struct TripStore {
    api: Arc<dyn TripsApi>,
    trips: RwLock<HashMap<UserId, HashMap<TripId, Trip>>>,
}

impl TripStore {
    pub fn new(api: Arc<dyn TripsApi>) -> Self {
        Self {
            api,
            trips: RwLock::new(HashMap::new()),
        }
    }

    async fn insert(&self, user_id: UserId, trips: &[Trip]) {
        let mut map = self.trips.write().await;
        let user_trips = map.entry(user_id).or_default();
        for trip in trips {
            user_trips.insert(trip.id, trip.clone());
        }
    }

    /// Fetch all of a user's trips and merge them into the cache.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Trip>> {
        self.search(user_id, &TripFilter::default()).await
    }

    /// Fetch a user's trips matching `filter` and merge them into the cache.
    ///
    /// Cached trips that the filter excluded are kept.
    pub async fn search(&self, user_id: UserId, filter: &TripFilter) -> Result<Vec<Trip>> {
        let trips = self.api.list_trips(user_id, filter).await?;

        self.insert(user_id, &trips).await;
        debug!(user_id, count = trips.len(), "Merged trips into store");

        Ok(trips)
    }

    /// Return a trip, fetching it only if it is not cached.
    pub async fn retrieve(&self, user_id: UserId, trip_id: TripId) -> Result<Trip> {
        let cached = self.get(user_id, trip_id).await;
        if let Some(trip) = cached {
            return Ok(trip);
        }

        let trip = self.api.get_trip(user_id, trip_id).await?;
        self.insert(user_id, std::slice::from_ref(&trip)).await;

        Ok(trip)
    }

    /// Create a trip for `user_id` and cache it under its server-assigned id.
    pub async fn create(&self, user_id: UserId, new_trip: &NewTrip) -> Result<Trip> {
        let trip = self.api.create_trip(user_id, new_trip).await?;
        self.insert(user_id, std::slice::from_ref(&trip)).await;

        info!(user_id, trip_id = trip.id, "Trip created");
        Ok(trip)
    }

    /// Push a trip's edits to the server and cache the server's answer.
    pub async fn update(&self, user_id: UserId, trip: &Trip) -> Result<Trip> {
        let updated = self.api.update_trip(user_id, trip).await?;
        self.insert(user_id, std::slice::from_ref(&updated)).await;

        info!(user_id, trip_id = updated.id, "Trip updated");
        Ok(updated)
    }

    /// Delete a trip on the server and drop it from the cache.
    pub async fn destroy(&self, user_id: UserId, trip_id: TripId) -> Result<()> {
        self.api.delete_trip(user_id, trip_id).await?;

        if let Some(user_trips) = self.trips.write().await.get_mut(&user_id) {
            user_trips.remove(&trip_id);
        }

        info!(user_id, trip_id, "Trip deleted");
        Ok(())
    }

    /// Drop every cached trip of every user.
    pub async fn clear(&self) {
        self.trips.write().await.clear();
    }

    /// Cached copy of a trip, without touching the network
    pub async fn get(&self, user_id: UserId, trip_id: TripId) -> Option<Trip> {
        self.trips
            .read()
            .await
            .get(&user_id)
            .and_then(|user_trips| user_trips.get(&trip_id))
            .cloned()
    }

    /// Cached trips of a user, ordered by id. Empty for unknown users.
    pub async fn trip_list(&self, user_id: UserId) -> Vec<Trip> {
        let mut trips: Vec<Trip> = self
            .trips
            .read()
            .await
            .get(&user_id)
            .map(|user_trips| user_trips.values().cloned().collect())
            .unwrap_or_default();
        trips.sort_by_key(|t| t.id);
        trips
    }
}
