//! Calendar-date handling for availability queries and new bookings.
//!
//! Dates are plain `YYYY-MM-DD` strings interpreted in UTC.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::{
    errors::{BookingError, BookingResult},
    models::time_of_day::TimeOfDay,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

fn malformed_date(input: &str) -> BookingError {
    BookingError::MalformedDate(format!(
        "'{input}' is not a valid date, please use format YYYY-MM-DD"
    ))
}

pub fn parse_calendar_date(input: &str) -> BookingResult<NaiveDate> {
    // chrono would also take unpadded months and days
    if input.len() != 10 {
        return Err(malformed_date(input));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| malformed_date(input))
}

/// `[start of day, start of next day)` in UTC.
pub fn day_bounds(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = NaiveDateTime::new(date, NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Joins a `YYYY-MM-DD` date and an `hh:mm AM/PM` time into one timestamp.
pub fn combine(date: &str, time: &str) -> BookingResult<DateTime<Utc>> {
    let date = parse_calendar_date(date)?;
    let time: TimeOfDay = time.parse().map_err(|_| {
        BookingError::MalformedDate(format!(
            "'{time}' is not a valid time, please use format hh:mm AM/PM"
        ))
    })?;
    Ok(NaiveDateTime::new(date, time.time()).and_utc())
}
