//! Schedule (solution) model.
//!
//! A schedule pairs a calendar date with, for every available person,
//! the ordered list of stations they hold, one entry per time slot.
//! Once returned to the host it is plain data: hand edits made by the
//! host are never re-validated by the engine.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Station;

/// A complete one-day rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// ISO-8601 calendar date (YYYY-MM-DD) the rotation was generated for.
    pub date: String,
    /// Per-person station sequences, in roster order.
    pub people: Vec<PersonSchedule>,
}

/// One person's station sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSchedule {
    /// Person name.
    pub name: String,
    /// Station name per slot.
    pub stations: Vec<String>,
}

impl PersonSchedule {
    /// Creates an empty sequence for a person.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stations: Vec::new(),
        }
    }

    /// Appends the station for the next slot.
    pub fn push(&mut self, station: impl Into<String>) {
        self.stations.push(station.into());
    }
}

impl Schedule {
    /// Creates an empty schedule for a date.
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            people: Vec::new(),
        }
    }

    /// Adds a person's sequence.
    pub fn with_person(mut self, person: PersonSchedule) -> Self {
        self.people.push(person);
        self
    }

    /// Number of slots (length of the longest sequence).
    pub fn slot_count(&self) -> usize {
        self.people
            .iter()
            .map(|p| p.stations.len())
            .max()
            .unwrap_or(0)
    }

    /// Finds a person's sequence.
    pub fn person(&self, name: &str) -> Option<&PersonSchedule> {
        self.people.iter().find(|p| p.name == name)
    }

    /// Station held by `person` during `slot`.
    pub fn station_at(&self, person: &str, slot: usize) -> Option<&str> {
        self.person(person)
            .and_then(|p| p.stations.get(slot))
            .map(String::as_str)
    }

    /// `(person, station)` pairs for one slot, in roster order.
    pub fn slot_assignment(&self, slot: usize) -> Vec<(&str, &str)> {
        self.people
            .iter()
            .filter_map(|p| {
                p.stations
                    .get(slot)
                    .map(|s| (p.name.as_str(), s.as_str()))
            })
            .collect()
    }

    /// People holding `station` during `slot`.
    pub fn holders(&self, station: &str, slot: usize) -> Vec<&str> {
        self.slot_assignment(slot)
            .into_iter()
            .filter(|(_, s)| *s == station)
            .map(|(p, _)| p)
            .collect()
    }

    /// Whether a (possibly hand-edited) schedule no longer fits the
    /// current configuration and must be rebuilt.
    ///
    /// True if any sequence length differs from `slot_count`, or if a
    /// configured station is not held by anyone in any slot.
    pub fn needs_regeneration(&self, slot_count: usize, stations: &[Station]) -> bool {
        if self.people.iter().any(|p| p.stations.len() != slot_count) {
            return true;
        }

        let present: HashSet<&str> = self
            .people
            .iter()
            .flat_map(|p| p.stations.iter())
            .filter(|s| !s.is_empty())
            .map(String::as_str)
            .collect();

        stations.iter().any(|s| !present.contains(s.name.as_str()))
    }
}
