//! Person (roster entry) model.
//!
//! A person is a member of the roster who may be placed on one station
//! per time slot. Availability for a given date is derived from the
//! `active` flag and an optional fixed weekly day off.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A roster member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Unique, non-empty identifier (also the display name).
    pub name: String,
    /// Inactive people are never scheduled.
    pub active: bool,
    /// Fixed weekly day off.
    pub day_off: DayOff,
}

/// A weekly day off, or none.
///
/// Serialized as its label: an English weekday name or `N/A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DayOff {
    /// No fixed day off.
    #[default]
    None,
    /// Unavailable on this weekday every week.
    Day(Weekday),
}

impl Person {
    /// Creates an active person with no day off.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: true,
            day_off: DayOff::None,
        }
    }

    /// Marks the person inactive.
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Sets the active flag.
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Sets the weekly day off.
    pub fn with_day_off(mut self, day_off: impl Into<DayOff>) -> Self {
        self.day_off = day_off.into();
        self
    }

    /// Whether this person can work on the given weekday.
    pub fn is_available_on(&self, weekday: Weekday) -> bool {
        self.active && !self.day_off.matches(weekday)
    }
}

impl DayOff {
    /// Parses a day-off label.
    ///
    /// Accepts English and Portuguese weekday names (case-insensitive,
    /// Portuguese with or without accents) and the sentinels `N/A`,
    /// `none` and the empty string. Unrecognized labels mean no fixed
    /// day off.
    pub fn from_label(label: &str) -> Self {
        let normalized = label.trim().to_lowercase();
        let weekday = match normalized.as_str() {
            "sunday" | "domingo" => Weekday::Sun,
            "monday" | "segunda" | "segunda-feira" => Weekday::Mon,
            "tuesday" | "terça" | "terca" | "terça-feira" | "terca-feira" => Weekday::Tue,
            "wednesday" | "quarta" | "quarta-feira" => Weekday::Wed,
            "thursday" | "quinta" | "quinta-feira" => Weekday::Thu,
            "friday" | "sexta" | "sexta-feira" => Weekday::Fri,
            "saturday" | "sábado" | "sabado" => Weekday::Sat,
            _ => return DayOff::None,
        };
        DayOff::Day(weekday)
    }

    /// Whether this day off falls on `weekday`.
    #[inline]
    pub fn matches(&self, weekday: Weekday) -> bool {
        matches!(self, DayOff::Day(d) if *d == weekday)
    }

    /// Canonical label (English weekday name or `N/A`).
    pub fn label(&self) -> &'static str {
        match self {
            DayOff::None => "N/A",
            DayOff::Day(Weekday::Sun) => "Sunday",
            DayOff::Day(Weekday::Mon) => "Monday",
            DayOff::Day(Weekday::Tue) => "Tuesday",
            DayOff::Day(Weekday::Wed) => "Wednesday",
            DayOff::Day(Weekday::Thu) => "Thursday",
            DayOff::Day(Weekday::Fri) => "Friday",
            DayOff::Day(Weekday::Sat) => "Saturday",
        }
    }
}

impl From<Weekday> for DayOff {
    fn from(weekday: Weekday) -> Self {
        DayOff::Day(weekday)
    }
}

impl From<&str> for DayOff {
    fn from(label: &str) -> Self {
        DayOff::from_label(label)
    }
}

impl From<String> for DayOff {
    fn from(label: String) -> Self {
        DayOff::from_label(&label)
    }
}

impl From<DayOff> for String {
    fn from(day_off: DayOff) -> Self {
        day_off.label().to_string()
    }
}

impl fmt::Display for DayOff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
