//! Trip types

use super::{TripId, UserId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A trip, owned by a single user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trip {
    pub id: TripId,
    /// Owning user
    pub user: UserId,
    pub destination: String,
    #[serde(with = "crate::date::wire")]
    pub start_date: NaiveDate,
    #[serde(with = "crate::date::wire")]
    pub end_date: NaiveDate,
    pub comment: Option<String>,
}

impl Trip {
    /// Number of days covered by the trip, counting both ends.
    ///
    /// Returns zero when the end date precedes the start date.
    pub fn duration_days(&self) -> i64 {
        let days = (self.end_date - self.start_date).num_days();
        if days < 0 {
            0
        } else {
            days + 1
        }
    }
}

/// Data for creating a new trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTrip {
    pub destination: String,
    #[serde(with = "crate::date::wire")]
    pub start_date: NaiveDate,
    #[serde(with = "crate::date::wire")]
    pub end_date: NaiveDate,
    pub comment: Option<String>,
}

impl NewTrip {
    pub fn new(destination: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            destination: destination.into(),
            start_date,
            end_date,
            comment: None,
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}
