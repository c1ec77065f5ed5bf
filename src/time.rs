//! Tolerant timestamp type for API date fields.
//!
//! The API is inconsistent about date formats across record types: albums carry
//! full timestamps, some songs only a bare date, and some fields are empty or
//! `null`. [`FlexibleTime`] accepts all of them and never fails the surrounding
//! record: anything it cannot understand leaves the value unset.

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

/// Canonical text emitted for an unset timestamp.
pub const ZERO_TIME: &str = "0001-01-01T00:00:00Z";

type LayoutParser = fn(&str) -> Option<DateTime<FixedOffset>>;

/// Accepted layouts, tried in order. The first one that parses wins.
const LAYOUTS: [(&str, LayoutParser); 7] = [
    ("offset", parse_offset),
    ("offset-fraction", parse_offset_fraction),
    ("naive-fraction", parse_naive_fraction),
    ("naive", parse_naive),
    ("date", parse_date),
    ("rfc3339", parse_rfc3339),
    ("naive-space", parse_naive_space),
];

/// A timestamp that may be unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlexibleTime(Option<DateTime<FixedOffset>>);

impl FlexibleTime {
    pub fn new(time: DateTime<FixedOffset>) -> Self {
        Self(Some(time))
    }

    /// Parses raw wire text. Quotes are stripped; empty, `null` and unknown
    /// layouts produce an unset value.
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim().trim_matches('"').trim();
        if value.is_empty() || value == "null" {
            return Self(None);
        }

        for (name, parser) in LAYOUTS {
            if let Some(time) = parser(value) {
                tracing::trace!(layout = name, value, "parsed timestamp");
                return Self(Some(time));
            }
        }

        tracing::debug!(value, "unrecognised timestamp layout, leaving unset");
        Self(None)
    }

    pub fn get(&self) -> Option<DateTime<FixedOffset>> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    /// RFC3339 text with second precision, `Z` for UTC.
    pub fn to_rfc3339(&self) -> String {
        match self.0 {
            Some(time) => time.to_rfc3339_opts(SecondsFormat::Secs, true),
            None => ZERO_TIME.to_string(),
        }
    }
}

impl From<DateTime<FixedOffset>> for FlexibleTime {
    fn from(time: DateTime<FixedOffset>) -> Self {
        Self::new(time)
    }
}

impl fmt::Display for FlexibleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for FlexibleTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for FlexibleTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FlexibleTimeVisitor)
    }
}

struct FlexibleTimeVisitor;

impl<'de> Visitor<'de> for FlexibleTimeVisitor {
    type Value = FlexibleTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a timestamp string, null, or nothing")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(FlexibleTime::parse(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FlexibleTime::default())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(FlexibleTime::default())
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    // Numbers and booleans never match a layout.
    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(FlexibleTime::default())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(FlexibleTime::default())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(FlexibleTime::default())
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(FlexibleTime::default())
    }
}

// chrono's `%:z` wants a numeric offset, so a trailing `Z` is rewritten first.
fn normalize_zulu(value: &str) -> String {
    match value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        Some(rest) => format!("{rest}+00:00"),
        None => value.to_string(),
    }
}

fn parse_offset(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(&normalize_zulu(value), "%Y-%m-%dT%H:%M:%S%:z").ok()
}

fn parse_offset_fraction(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(&normalize_zulu(value), "%Y-%m-%dT%H:%M:%S%.f%:z").ok()
}

fn parse_naive_fraction(value: &str) -> Option<DateTime<FixedOffset>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|t| t.and_utc().fixed_offset())
}

fn parse_naive(value: &str) -> Option<DateTime<FixedOffset>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|t| t.and_utc().fixed_offset())
}

fn parse_date(value: &str) -> Option<DateTime<FixedOffset>> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc().fixed_offset())
}

fn parse_rfc3339(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

fn parse_naive_space(value: &str) -> Option<DateTime<FixedOffset>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .ok()
        .map(|t| t.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_quotes_before_parsing() {
        let t = FlexibleTime::parse("\"2020-01-02\"");
        assert_eq!(t.to_rfc3339(), "2020-01-02T00:00:00Z");
    }

    #[test]
    fn unknown_layout_is_unset() {
        assert!(!FlexibleTime::parse("last tuesday").is_set());
        assert!(!FlexibleTime::parse("12/08/2019").is_set());
    }

    #[test]
    fn unset_serializes_as_zero_time() {
        assert_eq!(FlexibleTime::default().to_string(), ZERO_TIME);
    }

    #[test]
    fn non_string_json_is_tolerated() {
        let t: FlexibleTime = serde_json::from_str("1575775800").unwrap();
        assert!(!t.is_set());
        let t: FlexibleTime = serde_json::from_str("false").unwrap();
        assert!(!t.is_set());
    }
}
