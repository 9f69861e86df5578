//! Trip operations for the Easy Rider API.
//!
//! Trips are nested under their owner: every call is scoped by a user id.

use crate::error::{error_for_status, ClientError, Result};
use crate::types::{ApiTrip, TripFilter, TripPayload};
use reqwest::header::AUTHORIZATION;
use reqwest::Client;
use rider_core::{NewTrip, Trip, TripId, UserId};
use tracing::debug;

/// Trips client for the Easy Rider API.
pub struct TripsClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    authorization: &'a str,
}

impl<'a> TripsClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, authorization: &'a str) -> Self {
        Self {
            http,
            base_url,
            authorization,
        }
    }

    fn trips_url(&self, user_id: UserId) -> String {
        format!("{}/users/{}/trips/", self.base_url, user_id)
    }

    fn trip_url(&self, user_id: UserId, trip_id: TripId) -> String {
        format!("{}/users/{}/trips/{}/", self.base_url, user_id, trip_id)
    }

    async fn parse_trip(response: reqwest::Response) -> Result<Trip> {
        let trip: ApiTrip = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse trip response: {}", e))
        })?;
        Ok(Trip::try_from(trip)?)
    }

    /// List all trips of a user.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Trip>> {
        self.list_filtered(user_id, &TripFilter::default()).await
    }

    /// List a user's trips matching server-side filters.
    pub async fn list_filtered(&self, user_id: UserId, filter: &TripFilter) -> Result<Vec<Trip>> {
        let mut url = self.trips_url(user_id);

        if !filter.is_empty() {
            let query: String = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(filter.query_pairs())
                .finish();
            url = format!("{}?{}", url, query);
        }

        debug!(url = %url, user_id, "Listing trips");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.authorization)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            let trips: Vec<ApiTrip> = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse trips response: {}", e))
            })?;

            debug!(user_id, count = trips.len(), "Fetched trips");

            let trips = trips
                .into_iter()
                .map(Trip::try_from)
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(trips)
        } else {
            Err(error_for_status(response, &format!("Trips of user {}", user_id)).await)
        }
    }

    /// Get a single trip.
    pub async fn get(&self, user_id: UserId, trip_id: TripId) -> Result<Trip> {
        let url = self.trip_url(user_id, trip_id);
        debug!(url = %url, user_id, trip_id, "Fetching trip");

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.authorization)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Self::parse_trip(response).await
        } else {
            Err(error_for_status(response, &format!("Trip {}", trip_id)).await)
        }
    }

    /// Create a trip for a user.
    pub async fn create(&self, user_id: UserId, trip: &NewTrip) -> Result<Trip> {
        let url = self.trips_url(user_id);
        debug!(url = %url, user_id, destination = %trip.destination, "Creating trip");

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, self.authorization)
            .json(&TripPayload::for_new(user_id, trip))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Self::parse_trip(response).await
        } else {
            Err(error_for_status(response, &format!("Trips of user {}", user_id)).await)
        }
    }

    /// Update every editable field of a trip.
    pub async fn patch(&self, user_id: UserId, trip: &Trip) -> Result<Trip> {
        let url = self.trip_url(user_id, trip.id);
        debug!(url = %url, user_id, trip_id = trip.id, "Patching trip");

        let response = self
            .http
            .patch(&url)
            .header(AUTHORIZATION, self.authorization)
            .json(&TripPayload::from(trip))
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            Self::parse_trip(response).await
        } else {
            Err(error_for_status(response, &format!("Trip {}", trip.id)).await)
        }
    }

    /// Delete a trip.
    pub async fn delete(&self, user_id: UserId, trip_id: TripId) -> Result<()> {
        let url = self.trip_url(user_id, trip_id);
        debug!(url = %url, user_id, trip_id, "Deleting trip");

        let response = self
            .http
            .delete(&url)
            .header(AUTHORIZATION, self.authorization)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            debug!(user_id, trip_id, "Trip deleted");
            Ok(())
        } else {
            Err(error_for_status(response, &format!("Trip {}", trip_id)).await)
        }
    }
}
