//! Timestamp handling for OTX payloads.
//!
//! The OTX API is inconsistent in how it encodes times: most fields are
//! zone-less ISO-8601 strings (`"2021-05-01T12:00:00.123000"`), a few are
//! RFC3339, and some older payloads carry Unix epoch seconds.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::{OtxError, Result};

/// Format of zone-less local times. `%.f` also accepts a missing fraction.
const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A point in time decoded from one of the encodings OTX uses.
///
/// Zone-less values are interpreted as UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parse a raw JSON token.
    ///
    /// Encodings are tried in order: RFC3339 (bare or quoted), a quoted
    /// local time, a double-escaped quoted local time, then bare epoch
    /// seconds. A quoted number is never read as an epoch.
    ///
    /// # Errors
    ///
    /// Returns [`OtxError::UnparsableTimestamp`] carrying the raw input when
    /// no encoding matches.
    pub fn parse(raw: &[u8]) -> Result<Self> {
        let unparsable = || OtxError::UnparsableTimestamp(String::from_utf8_lossy(raw).into_owned());

        let text = std::str::from_utf8(raw).map_err(|_| unparsable())?.trim();
        let unquoted = strip_wrapper(text, "\"");

        if let Ok(dt) = DateTime::parse_from_rfc3339(unquoted.unwrap_or(text)) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        if let Some(inner) = unquoted {
            if let Ok(naive) = NaiveDateTime::parse_from_str(inner, LOCAL_FORMAT) {
                return Ok(Self(naive.and_utc()));
            }
        }

        if let Some(inner) = strip_wrapper(unquoted.unwrap_or(text), "\\\"") {
            if let Ok(naive) = NaiveDateTime::parse_from_str(inner, LOCAL_FORMAT) {
                return Ok(Self(naive.and_utc()));
            }
        }

        text.parse::<i64>()
            .ok()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(Self)
            .ok_or_else(unparsable)
    }

    /// The decoded instant.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Consume the wrapper and return the decoded instant.
    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }
}

fn strip_wrapper<'a>(s: &'a str, wrapper: &str) -> Option<&'a str> {
    if s.len() < wrapper.len() * 2 {
        return None;
    }
    s.strip_prefix(wrapper)?.strip_suffix(wrapper)
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S UTC"))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // Re-encode the token so strings keep their quotes and escapes.
        let value = serde_json::Value::deserialize(deserializer)?;
        let raw = serde_json::to_vec(&value).map_err(de::Error::custom)?;
        Timestamp::parse(&raw).map_err(de::Error::custom)
    }
}
