//! Wall-clock values used by availability templates.
//!
//! Every time of day travels as its canonical label, `hh:mm AM` / `hh:mm PM`
//! (12-hour clock, zero padded, uppercase meridiem). The label is the key the
//! resolver counts bookings under, so two distinct minutes never share one.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Duration, NaiveTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::errors::{BookingError, BookingResult};

/// chrono format string for the canonical label
pub const LABEL_FORMAT: &str = "%I:%M %p";

/// A time of day at minute granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(NaiveTime);

impl TimeOfDay {
    /// Builds a time from a 24-hour `hour` and a `minute`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Takes the UTC time of day of `timestamp`, dropping seconds.
    pub fn from_timestamp(timestamp: &DateTime<Utc>) -> Self {
        let time = timestamp.time();
        Self(
            time - Duration::seconds(i64::from(time.second()))
                - Duration::nanoseconds(i64::from(time.nanosecond())),
        )
    }

    pub fn time(&self) -> NaiveTime {
        self.0
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.num_seconds_from_midnight() / 60
    }

    /// Adds `minutes`, returning `None` when the result would pass midnight.
    pub fn checked_add_minutes(self, minutes: u32) -> Option<Self> {
        let (time, wrapped) = self
            .0
            .overflowing_add_signed(Duration::minutes(i64::from(minutes)));
        (wrapped == 0).then_some(Self(time))
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(LABEL_FORMAT))
    }
}

impl FromStr for TimeOfDay {
    type Err = BookingError;

    fn from_str(s: &str) -> BookingResult<Self> {
        let invalid =
            || BookingError::Validation(format!("Invalid time '{s}'. Use hh:mm AM/PM"));

        // chrono accepts single-digit hours and lowercase meridiems; labels must not
        let bytes = s.as_bytes();
        if bytes.len() != 8 || bytes[2] != b':' || bytes[5] != b' ' {
            return Err(invalid());
        }
        if !(s.ends_with("AM") || s.ends_with("PM")) {
            return Err(invalid());
        }

        NaiveTime::parse_from_str(s, LABEL_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(de::Error::custom)
    }
}

/// A `{start, end}` pair of times within one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    /// Length in minutes; zero or negative for inverted ranges.
    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end.minutes_since_midnight()) - i64::from(self.start.minutes_since_midnight())
    }

    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
