//! Conversion helpers for wire dates and record keys.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{ClientError, Result};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date from the wire.
///
/// Accepts a plain `YYYY-MM-DD` date or an RFC 3339 timestamp, in which
/// case the UTC date part is kept.
///
/// # Examples
/// ```
/// use memberclaims_client::convert::parse_date;
/// let d = parse_date("2024-01-15T10:30:00.000Z").unwrap();
/// assert_eq!(d.to_string(), "2024-01-15");
/// ```
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, DATE_FORMAT) {
        return Ok(date);
    }
    parse_timestamp(value).map(|ts| ts.date_naive())
}

/// Parse an RFC 3339 timestamp.
pub fn parse_timestamp(rfc3339: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(rfc3339.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ClientError::InvalidArgument(format!("invalid timestamp {}: {}", rfc3339, e)))
}

/// Current time in UTC.
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Read a backend record as a JSON object with its key under `id`.
///
/// Records carry their key as `id` or as the store's `_id`; `id` wins when
/// both are present.
pub(crate) fn record_fields<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<serde_json::Value, D::Error> {
    let mut fields = serde_json::Map::deserialize(deserializer)?;
    if let Some(store_id) = fields.remove("_id") {
        fields.entry("id").or_insert(store_id);
    }
    Ok(serde_json::Value::Object(fields))
}

/// Serde adapter for calendar dates written as `YYYY-MM-DD`.
pub mod wire_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(super::DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(|e| serde::de::Error::custom(e.message()))
    }
}
