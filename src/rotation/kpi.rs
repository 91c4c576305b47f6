//! Rotation quality metrics (KPIs).
//!
//! Computes fairness and validity indicators from a schedule and the
//! station configuration it was generated against. Works on hand-edited
//! schedules too, so hosts can surface what an edit broke.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Station Counts | Slots each person spent on each station |
//! | Distinct Stations | Number of different stations per person |
//! | Avg Distinct Stations | Mean of the above |
//! | Unique Repeats | Consecutive slots with the same Unique station |
//! | Uncovered Unique Slots | Slots where a Unique station has != 1 holder |

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::{Schedule, Station};

/// Rotation performance indicators.
#[derive(Debug, Clone)]
pub struct RotationKpi {
    /// Per person, per station: number of slots held.
    pub station_counts: HashMap<String, BTreeMap<String, usize>>,
    /// Per person: number of distinct stations held.
    pub distinct_stations: HashMap<String, usize>,
    /// Mean distinct stations per person.
    pub avg_distinct_stations: f64,
    /// Times someone held the same Unique station in consecutive slots.
    pub unique_repeats: usize,
    /// `(slot, station)` pairs where a Unique station is not held exactly once.
    pub uncovered_unique_slots: Vec<(usize, String)>,
}

impl RotationKpi {
    /// Computes KPIs from a schedule and its station configuration.
    ///
    /// Blank cells (from hand edits) are ignored.
    pub fn calculate(schedule: &Schedule, stations: &[Station]) -> Self {
        let unique: HashSet<&str> = stations
            .iter()
            .filter(|s| s.unique)
            .map(|s| s.name.as_str())
            .collect();

        let mut station_counts = HashMap::new();
        let mut distinct_stations = HashMap::new();
        let mut unique_repeats = 0;

        for person in &schedule.people {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for s in person.stations.iter().filter(|s| !s.is_empty()) {
                *counts.entry(s.clone()).or_insert(0) += 1;
            }

            unique_repeats += person
                .stations
                .windows(2)
                .filter(|w| w[0] == w[1] && unique.contains(w[0].as_str()))
                .count();

            distinct_stations.insert(person.name.clone(), counts.len());
            station_counts.insert(person.name.clone(), counts);
        }

        let avg_distinct_stations = if distinct_stations.is_empty() {
            0.0
        } else {
            distinct_stations.values().sum::<usize>() as f64 / distinct_stations.len() as f64
        };

        let mut uncovered_unique_slots = Vec::new();
        for slot in 0..schedule.slot_count() {
            for s in stations.iter().filter(|s| s.unique) {
                if schedule.holders(&s.name, slot).len() != 1 {
                    uncovered_unique_slots.push((slot, s.name.clone()));
                }
            }
        }

        Self {
            station_counts,
            distinct_stations,
            avg_distinct_stations,
            unique_repeats,
            uncovered_unique_slots,
        }
    }

    /// Whether the schedule satisfies the hard rotation rules.
    pub fn is_valid(&self) -> bool {
        self.unique_repeats == 0 && self.uncovered_unique_slots.is_empty()
    }

    /// Slots `person` spent on `station`.
    pub fn count(&self, person: &str, station: &str) -> usize {
        self.station_counts
            .get(person)
            .and_then(|c| c.get(station))
            .copied()
            .unwrap_or(0)
    }
}
