//! Availability filter.
//!
//! A person is available on a date iff they are active and their fixed
//! day off (if any) does not fall on the date's weekday. Roster order is
//! preserved.

use chrono::{Datelike, NaiveDate, Weekday};

use super::GenerationError;
use crate::models::Person;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO-8601 calendar date (`YYYY-MM-DD`) as a civil date.
///
/// The input must be the canonical zero-padded form: it also seeds the
/// random stream, so `2024-1-1` and `2024-01-01` must not both be accepted.
pub fn parse_date(date: &str) -> Result<NaiveDate, GenerationError> {
    let invalid = || GenerationError::InvalidDate {
        date: date.to_string(),
    };
    let parsed = NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| invalid())?;
    if parsed.format(DATE_FORMAT).to_string() != date {
        return Err(invalid());
    }
    Ok(parsed)
}

/// Weekday of an ISO-8601 calendar date.
pub fn weekday_of(date: &str) -> Result<Weekday, GenerationError> {
    parse_date(date).map(|d| d.weekday())
}

/// People available on `weekday`, in roster order.
pub fn available_people(people: &[Person], weekday: Weekday) -> Vec<&Person> {
    people.iter().filter(|p| p.is_available_on(weekday)).collect()
}

/// Names of people available on `weekday`, in roster order.
pub fn available_names(people: &[Person], weekday: Weekday) -> Vec<String> {
    available_people(people, weekday)
        .into_iter()
        .map(|p| p.name.clone())
        .collect()
}
