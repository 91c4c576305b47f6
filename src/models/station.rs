//! Station (work post) model.
//!
//! Stations are the posts people are placed on each time slot. Two
//! capacity flags determine how the allocator treats a station:
//!
//! | `unique` | `min_two_people` | Kind |
//! |----------|------------------|------|
//! | true | any | Unique: exactly one occupant per slot |
//! | false | true | Multi: at least two distinct occupants |
//! | false | false | Normal: any number of occupants |

use serde::{Deserialize, Serialize};

/// A work station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Station {
    /// Unique, non-empty identifier.
    pub name: String,
    /// Requires exactly one occupant per slot.
    pub unique: bool,
    /// Requires at least two distinct occupants.
    pub min_two_people: bool,
}

/// Capacity classification of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    /// Exactly one occupant per slot.
    Unique,
    /// Two or more occupants; dropped when too few people are available.
    Multi,
    /// Unconstrained.
    Normal,
}

impl Station {
    /// Creates a normal station.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            unique: false,
            min_two_people: false,
        }
    }

    /// Creates a unique station.
    pub fn unique(name: impl Into<String>) -> Self {
        Self::new(name).with_unique(true)
    }

    /// Creates a multi station.
    pub fn multi(name: impl Into<String>) -> Self {
        Self::new(name).with_min_two_people(true)
    }

    /// Creates a normal station.
    pub fn normal(name: impl Into<String>) -> Self {
        Self::new(name)
    }

    /// Sets the unique flag.
    pub fn with_unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Sets the minimum-two-people flag.
    pub fn with_min_two_people(mut self, min_two_people: bool) -> Self {
        self.min_two_people = min_two_people;
        self
    }

    /// Capacity classification.
    #[inline]
    pub fn kind(&self) -> StationKind {
        classify(self)
    }
}

/// Classifies a station. `unique` wins over `min_two_people`.
pub fn classify(station: &Station) -> StationKind {
    if station.unique {
        StationKind::Unique
    } else if station.min_two_people {
        StationKind::Multi
    } else {
        StationKind::Normal
    }
}
