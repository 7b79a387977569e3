//! Calendar values and their ISO-8601 wire encodings.
//!
//! Records are persisted as JSON, so every date-like field goes through one of
//! the `#[serde(with = ...)]` codecs below:
//!
//! | codec          | Rust type              | wire form                 |
//! |----------------|------------------------|---------------------------|
//! | `iso_date`     | `NaiveDate`            | `2025-03-14`              |
//! | `iso_time`     | `NaiveTime`            | `09:30:00`                |
//! | `iso_datetime` | `NaiveDateTime`        | `2025-03-14T09:30:00`     |
//! | `iso_duration` | `chrono::Duration`     | `PT30M`, `PT1H30M`, `PT0S`|
//!
//! Fractional seconds are written only when present, so values round-trip exactly.

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};

use crate::error::DomainError;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M:%S%.f";
const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Source of "now" for rules such as "an appointment cannot be in the past".
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock frozen at a given instant (tests, replays).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Render a duration as an ISO-8601 `PT..H..M..S` string.
///
/// Days are folded into hours (`PT25H`), zero renders as `PT0S` and negative
/// durations carry a leading `-`.
pub fn format_iso_duration(duration: &Duration) -> String {
    let negative = *duration < Duration::zero();
    let magnitude = if negative { -*duration } else { *duration };

    let total_seconds = magnitude.num_seconds();
    let nanos = magnitude.subsec_nanos().unsigned_abs();

    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str("PT");

    if hours == 0 && minutes == 0 && seconds == 0 && nanos == 0 {
        out.push_str("0S");
        return out;
    }
    if hours > 0 {
        out.push_str(&format!("{hours}H"));
    }
    if minutes > 0 {
        out.push_str(&format!("{minutes}M"));
    }
    if nanos > 0 {
        let fraction = format!("{nanos:09}");
        out.push_str(&format!("{seconds}.{}S", fraction.trim_end_matches('0')));
    } else if seconds > 0 {
        out.push_str(&format!("{seconds}S"));
    }
    out
}

/// Parse an ISO-8601 duration of the form `[-]P[nD][T[nH][nM][n[.f]S]]`.
pub fn parse_iso_duration(input: &str) -> Result<Duration, DomainError> {
    let invalid = || DomainError::validation(format!("invalid ISO-8601 duration: '{input}'"));

    let text = input.trim().to_ascii_uppercase();
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(&text)),
    };
    let body = unsigned.strip_prefix('P').ok_or_else(invalid)?;

    let (date_part, time_part) = match body.split_once('T') {
        Some((date, time)) => (date, Some(time)),
        None => (body, None),
    };

    let mut total = Duration::zero();
    let mut seen_component = false;

    if !date_part.is_empty() {
        let days: i64 = date_part
            .strip_suffix('D')
            .and_then(|n| n.parse().ok())
            .ok_or_else(invalid)?;
        total = Duration::try_days(days).ok_or_else(invalid)?;
        seen_component = true;
    }

    if let Some(time) = time_part {
        if time.is_empty() {
            return Err(invalid());
        }

        let mut remaining = time;
        let mut last_rank = 0;
        while !remaining.is_empty() {
            let unit_pos = remaining
                .find(|c: char| matches!(c, 'H' | 'M' | 'S'))
                .ok_or_else(invalid)?;
            let (number, tail) = remaining.split_at(unit_pos);
            let unit = tail.chars().next().ok_or_else(invalid)?;

            let rank = match unit {
                'H' => 1,
                'M' => 2,
                _ => 3,
            };
            if rank <= last_rank || number.is_empty() {
                return Err(invalid());
            }
            last_rank = rank;

            let component = match unit {
                'H' => number
                    .parse()
                    .ok()
                    .and_then(Duration::try_hours)
                    .ok_or_else(invalid)?,
                'M' => number
                    .parse()
                    .ok()
                    .and_then(Duration::try_minutes)
                    .ok_or_else(invalid)?,
                _ => parse_seconds(number).ok_or_else(invalid)?,
            };
            total = total.checked_add(&component).ok_or_else(invalid)?;
            seen_component = true;
            remaining = tail.get(1..).unwrap_or_default();
        }
    }

    if !seen_component {
        return Err(invalid());
    }

    Ok(if negative { -total } else { total })
}

fn parse_seconds(number: &str) -> Option<Duration> {
    let (whole, fraction) = match number.split_once(['.', ',']) {
        Some((whole, fraction)) => (whole, fraction),
        None => (number, ""),
    };

    if fraction.len() > 9 || !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let seconds: i64 = whole.parse().ok()?;
    let mut nanos: i64 = if fraction.is_empty() {
        0
    } else {
        format!("{fraction:0<9}").parse().ok()?
    };
    if whole.starts_with('-') {
        nanos = -nanos;
    }

    Duration::try_seconds(seconds)?.checked_add(&Duration::nanoseconds(nanos))
}

/// `#[serde(with = "iso_date")]` for `NaiveDate`.
pub mod iso_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::DATE_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, super::DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "iso_time")]` for `NaiveTime`.
pub mod iso_time {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::TIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, super::TIME_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "iso_datetime")]` for `NaiveDateTime`.
pub mod iso_datetime {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(super::DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, super::DATETIME_FORMAT)
            .map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "iso_duration")]` for `chrono::Duration`.
pub mod iso_duration {
    use chrono::Duration;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_iso_duration(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_iso_duration(&raw).map_err(serde::de::Error::custom)
    }
}
