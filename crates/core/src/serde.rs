//! Serde helper functions for spreadsheet-backed payloads.
//!
//! Records coming from the gateway are rows of a spreadsheet, so blank cells
//! arrive as empty strings, date cells may arrive as full ISO timestamps and
//! identifier cells may arrive as numbers.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses a calendar date, accepting `YYYY-MM-DD` or a full ISO timestamp.
///
/// Spreadsheet dates arrive as UTC instants of the sheet's local midnight,
/// so a timestamp is read in the local timezone before its date is taken.
/// See [`parse_calendar_date_in`].
pub fn parse_calendar_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    parse_calendar_date_in(s, &Local)
}

/// Parses a calendar date, reading timestamps in `tz`.
///
/// A timestamp with an offset (`Z`, `+02:00`) is an instant and takes the
/// date it falls on in `tz`. A timestamp without one keeps its own date.
pub fn parse_calendar_date_in<Tz: TimeZone>(
    s: &str,
    tz: &Tz,
) -> Result<NaiveDate, chrono::ParseError> {
    let s = s.trim();
    if !s.contains('T') {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d");
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(instant) => Ok(instant.with_timezone(tz).date_naive()),
        Err(_) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").map(|at| at.date()),
    }
}

/// Deserialize a required calendar date (see [`parse_calendar_date`]).
pub fn deserialize_calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_calendar_date(&s).map_err(serde::de::Error::custom)
}

/// Deserialize an optional calendar date, treating empty strings as None.
pub fn deserialize_optional_calendar_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_calendar_date(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize an optional string, treating empty strings as None.
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.filter(|s| !s.trim().is_empty()))
}

/// Deserialize an identifier from either a JSON string or a JSON number.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else {
                // Spreadsheet numbers are floats; whole ones are printed without a fraction.
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 => Ok(format!("{}", f as i64)),
                    Some(f) => Ok(f.to_string()),
                    None => Err(serde::de::Error::custom("invalid numeric identifier")),
                }
            }
        }
        other => Err(serde::de::Error::custom(format!(
            "expected string or number identifier, got {other}"
        ))),
    }
}
