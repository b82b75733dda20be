use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an RFC 3339 timestamp, or a naive ISO-8601 one as UTC.
///
/// The backend serializes `utcnow()` values without an offset, so a missing
/// zone always means UTC.
pub fn parse_flexible_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = s.strip_suffix('Z').unwrap_or(s);
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(naive, format).ok())
        .map(|dt| DateTime::from_naive_utc_and_offset(dt, Utc))
}

/// Parses a calendar date given either bare (`2026-02-16`) or as a full
/// timestamp, in which case the UTC date is kept.
pub fn parse_flexible_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| parse_flexible_datetime(s).map(|dt| dt.date_naive()))
}

pub(crate) fn deserialize_flexible_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_flexible_date(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("Failed to parse date '{s}'")))
}

pub(crate) fn deserialize_flexible_datetime<'de, D>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_flexible_datetime(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("Failed to parse datetime '{s}'")))
}

pub(crate) fn deserialize_optional_datetime<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) => parse_flexible_datetime(&s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("Failed to parse datetime '{s}'"))),
        None => Ok(None),
    }
}
