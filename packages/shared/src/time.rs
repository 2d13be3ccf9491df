//! Time-related utilities.
//!
//! All timestamps in the relay are unix epoch milliseconds (UTC), the
//! same representation that goes out on the wire in `ts` fields.

use chrono::{DateTime, Utc};

/// Get the current unix timestamp in milliseconds.
pub fn unix_timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert a unix timestamp (milliseconds) to RFC 3339 format.
///
/// Out-of-range values fall back to the raw number so a bad timestamp
/// never poisons an API response.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_else(|| timestamp_millis.to_string())
}
