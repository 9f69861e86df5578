//! Types for Easy Rider API requests and responses.
//!
//! The backend renders JSON with camelCase keys and never returns
//! passwords. Wire records are converted into `rider_core` domain types as
//! soon as they are received; conversion failures (unknown role, malformed
//! date) surface as errors instead of entering the stores.

use chrono::NaiveDate;
use rider_core::date::{date_to_string, parse_date};
use rider_core::{CurrentUser, NewTrip, NewUser, Role, RiderError, Trip, TripId, User, UserId};
use serde::{Deserialize, Serialize};

/// Default backend base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";

/// Default `Authorization` scheme
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Configuration for connecting to the Easy Rider API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API (e.g., "http://localhost:8000/api")
    pub url: String,
    /// Current access token (if authenticated)
    pub token: Option<String>,
    /// Scheme sent before the token in the `Authorization` header
    pub token_type: String,
}

impl ClientConfig {
    /// Create a new config with just the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: None,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
        }
    }

    /// Create a config with an existing token.
    pub fn with_token(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            ..Self::new(url)
        }
    }

    /// Override the `Authorization` scheme (e.g. "JWT").
    #[must_use]
    pub fn token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

// =============================================================================
// Authentication Types
// =============================================================================

/// Request body for the token endpoint.
#[derive(Debug, Serialize)]
pub struct TokenRequest {
    pub email: String,
    pub password: String,
}

/// Response from a successful token exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

// =============================================================================
// User Types
// =============================================================================

/// A user as returned by the server.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiUser {
    pub id: UserId,
    pub email: String,
    pub role: i64,
    /// Write-only on the backend; only present if a server echoes it
    #[serde(default)]
    pub password: Option<String>,
}

impl TryFrom<ApiUser> for User {
    type Error = RiderError;

    fn try_from(user: ApiUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id,
            email: user.email,
            role: Role::try_from(user.role)?,
            password: user.password.unwrap_or_default(),
        })
    }
}

impl TryFrom<ApiUser> for CurrentUser {
    type Error = RiderError;

    fn try_from(user: ApiUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id,
            email: user.email,
            role: Role::try_from(user.role)?,
        })
    }
}

/// Full user payload for create and PUT.
#[derive(Debug, Clone, Serialize)]
pub struct UserPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    pub email: String,
    pub role: Role,
    pub password: String,
}

impl From<&NewUser> for UserPayload {
    fn from(user: &NewUser) -> Self {
        Self {
            id: None,
            email: user.email.clone(),
            role: user.role,
            password: user.password.clone(),
        }
    }
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id),
            email: user.email.clone(),
            role: user.role,
            password: user.password.clone(),
        }
    }
}

/// Partial user update that leaves the password untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserPatch {
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserPatch {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            role: user.role,
        }
    }
}

// =============================================================================
// Trip Types
// =============================================================================

/// A trip as returned by the server, dates still in wire form.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTrip {
    pub id: TripId,
    pub user: UserId,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl TryFrom<ApiTrip> for Trip {
    type Error = RiderError;

    fn try_from(trip: ApiTrip) -> Result<Self, Self::Error> {
        Ok(Self {
            id: trip.id,
            user: trip.user,
            destination: trip.destination,
            start_date: parse_date(&trip.start_date)?,
            end_date: parse_date(&trip.end_date)?,
            comment: trip.comment,
        })
    }
}

/// Trip body for create and PATCH, dates already formatted for the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripPayload {
    pub user: UserId,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub comment: Option<String>,
}

impl TripPayload {
    pub fn for_new(user: UserId, trip: &NewTrip) -> Self {
        Self {
            user,
            destination: trip.destination.clone(),
            start_date: date_to_string(trip.start_date),
            end_date: date_to_string(trip.end_date),
            comment: trip.comment.clone(),
        }
    }
}

impl From<&Trip> for TripPayload {
    fn from(trip: &Trip) -> Self {
        Self {
            user: trip.user,
            destination: trip.destination.clone(),
            start_date: date_to_string(trip.start_date),
            end_date: date_to_string(trip.end_date),
            comment: trip.comment.clone(),
        }
    }
}

/// Server-side filters for listing a user's trips.
///
/// Every field is optional; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripFilter {
    pub destination: Option<String>,
    pub destination_contains: Option<String>,
    pub comment_contains: Option<String>,
    pub start_date_gte: Option<NaiveDate>,
    pub start_date_lte: Option<NaiveDate>,
    pub end_date_gte: Option<NaiveDate>,
    pub end_date_lte: Option<NaiveDate>,
}

impl TripFilter {
    /// Trips overlapping the inclusive range `[from, to]`
    pub fn overlapping(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            start_date_lte: Some(to),
            end_date_gte: Some(from),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Query-string pairs in the backend's filter naming
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.destination {
            pairs.push(("destination", v.clone()));
        }
        if let Some(v) = &self.destination_contains {
            pairs.push(("destination__contains", v.clone()));
        }
        if let Some(v) = &self.comment_contains {
            pairs.push(("comment__contains", v.clone()));
        }
        let dates = [
            ("start_date__gte", self.start_date_gte),
            ("start_date__lte", self.start_date_lte),
            ("end_date__gte", self.end_date_gte),
            ("end_date__lte", self.end_date_lte),
        ];
        for (key, date) in dates {
            if let Some(d) = date {
                pairs.push((key, date_to_string(d)));
            }
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_trip_uses_camel_case() {
        let trip: ApiTrip = serde_json::from_value(serde_json::json!({
            "id": 1,
            "user": 2,
            "destination": "Oslo",
            "startDate": "2020-07-01",
            "endDate": "2020-08-01",
            "comment": null
        }))
        .unwrap();

        let trip = Trip::try_from(trip).unwrap();
        assert_eq!(trip.start_date, NaiveDate::from_ymd_opt(2020, 7, 1).unwrap());
        assert_eq!(trip.comment, None);
    }

    #[test]
    fn trip_payload_formats_dates() {
        let trip = Trip {
            id: 9,
            user: 2,
            destination: "Oslo".to_string(),
            start_date: NaiveDate::from_ymd_opt(2020, 7, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2020, 8, 1).unwrap(),
            comment: Some("fjords".to_string()),
        };
        let json = serde_json::to_value(TripPayload::from(&trip)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user": 2,
                "destination": "Oslo",
                "startDate": "2020-07-01",
                "endDate": "2020-08-01",
                "comment": "fjords"
            })
        );
    }

    #[test]
    fn api_user_with_unknown_role_is_rejected() {
        let user = ApiUser {
            id: 1,
            email: "x@example.com".to_string(),
            role: 3,
            password: None,
        };
        assert_eq!(User::try_from(user), Err(RiderError::InvalidRole(3)));
    }

    #[test]
    fn user_patch_omits_password() {
        let user = User::new(4, "p@example.com", Role::Manager);
        let json = serde_json::to_value(UserPatch::from(&user)).unwrap();
        assert_eq!(json, serde_json::json!({"email": "p@example.com", "role": 2}));
    }

    #[test]
    fn new_user_payload_has_no_id() {
        let payload = UserPayload::from(&NewUser::new("n@example.com", "pw", Role::User));
        let json = serde_json::to_value(payload).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["password"], "pw");
    }

    #[test]
    fn filter_query_pairs() {
        let from = NaiveDate::from_ymd_opt(2020, 7, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2020, 7, 31).unwrap();
        let filter = TripFilter {
            destination_contains: Some("Ber".to_string()),
            ..TripFilter::overlapping(from, to)
        };

        assert_eq!(
            filter.query_pairs(),
            vec![
                ("destination__contains", "Ber".to_string()),
                ("start_date__lte", "2020-07-31".to_string()),
                ("end_date__gte", "2020-07-01".to_string()),
            ]
        );
        assert!(TripFilter::default().is_empty());
        assert!(!filter.is_empty());
    }
}
