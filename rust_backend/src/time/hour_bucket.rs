use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Utc};
use std::fmt;
use std::str::FromStr;

use crate::core::domain::{HourBucket, RawValue};

/// Naive layouts accepted for completion timestamps, tried in order.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Zone in which completion times are truncated to the hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZoneMode {
    /// The host's local time zone.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl ZoneMode {
    /// Converts an absolute instant into wall-clock time of this zone.
    pub fn wall_clock(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            ZoneMode::Local => instant.with_timezone(&Local).naive_local(),
            ZoneMode::Utc => instant.naive_utc(),
            ZoneMode::Fixed(offset) => instant.with_timezone(offset).naive_local(),
        }
    }
}

impl FromStr for ZoneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        match value.to_lowercase().as_str() {
            "local" => return Ok(ZoneMode::Local),
            "utc" | "z" => return Ok(ZoneMode::Utc),
            _ => {}
        }
        parse_fixed_offset(value)
            .map(ZoneMode::Fixed)
            .ok_or_else(|| {
                format!(
                    "Invalid zone: {}. Must be 'local', 'utc', or an offset like '+08:00'",
                    s
                )
            })
    }
}

impl fmt::Display for ZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneMode::Local => f.write_str("local"),
            ZoneMode::Utc => f.write_str("utc"),
            ZoneMode::Fixed(offset) => write!(f, "{}", offset),
        }
    }
}

fn parse_fixed_offset(value: &str) -> Option<FixedOffset> {
    let (sign, rest) = match value.as_bytes().first()? {
        b'+' => (1, &value[1..]),
        b'-' => (-1, &value[1..]),
        _ => return None,
    };
    let (hours, minutes) = match rest.split_once(':') {
        Some((h, m)) => (h, m),
        None if rest.len() == 4 && rest.is_ascii() => rest.split_at(2),
        None => (rest, "0"),
    };
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse a completion timestamp cell into wall-clock time of `zone`.
///
/// Timestamps carrying an offset (RFC 3339) are converted into the zone;
/// naive timestamps are taken as already expressed in it. Numbers are epoch
/// milliseconds. Anything else yields `None`.
pub fn parse_completion_time(value: &RawValue, zone: ZoneMode) -> Option<NaiveDateTime> {
    match value {
        RawValue::Number(millis) if millis.is_finite() => {
            DateTime::<Utc>::from_timestamp_millis(*millis as i64).map(|dt| zone.wall_clock(dt))
        }
        RawValue::Number(_) => None,
        RawValue::Text(text) => parse_timestamp_str(text, zone),
    }
}

/// String form of [`parse_completion_time`].
pub fn parse_timestamp_str(text: &str, zone: ZoneMode) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(zone.wall_clock(dt.with_timezone(&Utc)));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive);
        }
    }

    for format in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Hour bucket of a wall-clock completion time.
pub fn hour_bucket(time: &NaiveDateTime) -> HourBucket {
    HourBucket::from_datetime(time)
}
