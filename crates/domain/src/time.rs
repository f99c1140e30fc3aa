//! Timestamp normalization for the store's `lastseen` column.

use chrono::{DateTime, NaiveDateTime};

/// Canonical display format for device timestamps.
const CANONICAL: &str = "%Y-%m-%d %H:%M:%S";

/// Normalize a store timestamp to `YYYY-MM-DD HH:MM:SS`.
///
/// Accepts ISO-8601 with an offset or zulu suffix (`2024-01-02T03:04:05Z`),
/// naive ISO-8601 (`2024-01-02T03:04:05`), and the store's native
/// `YYYY-MM-DD HH:MM:SS` form. Anything else is returned unchanged — this is
/// a total function, a bad timestamp must never poison a device record.
#[must_use]
pub fn normalize_timestamp(raw: &str) -> String {
    if raw.contains('T') {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return dt.format(CANONICAL).to_string();
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return dt.format(CANONICAL).to_string();
        }
    }
    raw.to_string()
}
