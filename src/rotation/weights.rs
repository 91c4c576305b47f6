//! Per-(person, station) selection weights.
//!
//! Every weight starts at 1.0 and evolves across the slots of one run
//! according to a [`WeightPolicy`]. Floors keep every weight strictly
//! positive, so weighting alone never makes a station unreachable; only
//! the allocator's hard constraints exclude stations.
//!
//! A matrix is created per run and never shared between runs.

use super::{StationSet, WeightPolicy};
use crate::models::StationKind;

/// Dense person × station weight matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightMatrix {
    n_people: usize,
    n_stations: usize,
    values: Vec<f64>,
    multi_counts: Vec<usize>,
}

impl WeightMatrix {
    /// Creates a matrix with every weight at 1.0.
    pub fn new(n_people: usize, n_stations: usize) -> Self {
        Self {
            n_people,
            n_stations,
            values: vec![1.0; n_people * n_stations],
            multi_counts: vec![0; n_people],
        }
    }

    #[inline]
    pub fn n_people(&self) -> usize {
        self.n_people
    }

    #[inline]
    pub fn n_stations(&self) -> usize {
        self.n_stations
    }

    #[inline]
    pub fn get(&self, person: usize, station: usize) -> f64 {
        self.values[person * self.n_stations + station]
    }

    #[inline]
    fn set(&mut self, person: usize, station: usize, value: f64) {
        self.values[person * self.n_stations + station] = value;
    }

    /// One person's weights, indexed by station.
    pub fn row(&self, person: usize) -> &[f64] {
        let start = person * self.n_stations;
        &self.values[start..start + self.n_stations]
    }

    /// Number of Multi assignments recorded for `person` so far.
    pub fn multi_count(&self, person: usize) -> usize {
        self.multi_counts[person]
    }

    /// Applies the update rule for `person` having just held `station`.
    pub fn record(
        &mut self,
        person: usize,
        station: usize,
        stations: &StationSet,
        policy: &WeightPolicy,
    ) {
        match stations.kind(station) {
            StationKind::Unique => {
                self.set(person, station, policy.unique_floor);
            }
            StationKind::Multi => {
                let damped =
                    (self.get(person, station) * policy.multi_damping).max(policy.multi_floor);
                self.set(person, station, damped);

                for other in (0..self.n_stations).filter(|&s| s != station) {
                    let boosted = self.get(person, other) * policy.multi_boost;
                    self.set(person, other, boosted);
                }

                self.multi_counts[person] += 1;
                if self.multi_counts[person] >= policy.unique_pull_after {
                    for u in stations.indices_of(StationKind::Unique) {
                        let pulled = self.get(person, u) * policy.unique_pull_boost;
                        self.set(person, u, pulled);
                    }
                }
            }
            StationKind::Normal => {
                let damped =
                    (self.get(person, station) * policy.normal_damping).max(policy.normal_floor);
                self.set(person, station, damped);
            }
        }
    }
}
