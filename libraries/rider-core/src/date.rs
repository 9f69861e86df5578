//! Conversion between calendar dates and the backend's wire format.
//!
//! Trip dates travel as plain `YYYY-MM-DD` strings. Locally they are held as
//! [`NaiveDate`] so that comparisons and calendar arithmetic work directly.

use crate::error::{Result, RiderError};
use chrono::{DateTime, NaiveDate};

/// Wire format for dates exchanged with the backend.
pub const WIRE_FORMAT: &str = "%Y-%m-%d";

/// Format a date as a wire string.
pub fn date_to_string(date: NaiveDate) -> String {
    date.format(WIRE_FORMAT).to_string()
}

/// Parse a wire string into a date.
///
/// Plain `YYYY-MM-DD` is the expected form. Full RFC 3339 timestamps are
/// also accepted and truncated to their calendar date, since some backend
/// configurations serialize `DateField`s that way.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let trimmed = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, WIRE_FORMAT) {
        return Ok(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| RiderError::InvalidDate(value.to_string()))
}

/// Serde adapter for `NaiveDate` fields stored in wire format.
///
/// Use with `#[serde(with = "rider_core::date::wire")]`.
pub mod wire {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::date_to_string(*date))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(serde::de::Error::custom)
    }
}
