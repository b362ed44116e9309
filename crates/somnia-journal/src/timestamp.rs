//! Lenient timestamp decoding for legacy journal entries

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Epoch values above this are treated as milliseconds
const MILLIS_CUTOFF: i64 = 100_000_000_000;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parse a stored timestamp in any of the formats the journal has used.
///
/// Accepts RFC 3339 strings, naive date-times (taken as UTC), bare dates
/// (midnight UTC) and epoch numbers in seconds or milliseconds.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::String(s) => parse_str(s.trim()),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                from_epoch(i)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .and_then(|f| from_epoch(f as i64))
            }
        }
        _ => None,
    }
}

fn parse_str(s: &str) -> Option<DateTime<FixedOffset>> {
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date.and_hms_opt(0, 0, 0)?.and_utc().fixed_offset());
    }
    s.parse::<i64>().ok().and_then(from_epoch)
}

fn from_epoch(value: i64) -> Option<DateTime<FixedOffset>> {
    let utc: DateTime<Utc> = if value.abs() > MILLIS_CUTOFF {
        DateTime::from_timestamp_millis(value)?
    } else {
        DateTime::from_timestamp(value, 0)?
    };
    Some(utc.fixed_offset())
}

/// Serde hook: unparseable timestamps become "now" instead of failing the record
pub(crate) fn deserialize_lenient<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(parse_timestamp(&raw).unwrap_or_else(|| {
        tracing::warn!(timestamp = %raw, "malformed dream timestamp, substituting current time");
        Local::now().fixed_offset()
    }))
}
