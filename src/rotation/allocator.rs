//! Slot allocator: resolves one time slot by bounded randomized search.
//!
//! # Algorithm
//!
//! Each attempt:
//! 1. Shuffle the people.
//! 2. Fill every Unique station with a uniformly drawn eligible person.
//! 3. If enough people remain, fill every Multi station the same way.
//! 4. Place each remaining person by weighted draw over the stations they
//!    may legally take (open, not a just-held Unique station).
//! 5. Accept iff every Unique station is held exactly once.
//!
//! A person is *blocked* from a Unique station they held in the
//! immediately preceding slot. Non-Unique stations are never blocked.
//!
//! There is no backtracking. An attempt that dead-ends is discarded and
//! a fresh one starts; after `max_attempts` failures the slot is
//! reported unsatisfiable, even if a valid assignment exists.

use log::{debug, trace};

use super::{RotationRng, StationSet, WeightMatrix};
use crate::models::StationKind;

/// Station index per person index for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotAssignment {
    stations: Vec<usize>,
}

impl SlotAssignment {
    /// Builds an assignment from a station index per person.
    pub fn new(stations: Vec<usize>) -> Self {
        Self { stations }
    }

    /// Station held by `person`.
    #[inline]
    pub fn station_of(&self, person: usize) -> usize {
        self.stations[person]
    }

    /// `(person, station)` pairs in person order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.stations.iter().copied().enumerate()
    }

    /// Number of people holding `station`.
    pub fn holders(&self, station: usize) -> usize {
        self.stations.iter().filter(|&&s| s == station).count()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

/// Allocates people to stations for a single slot.
#[derive(Debug, Clone)]
pub struct SlotAllocator<'a> {
    stations: &'a StationSet,
    n_people: usize,
    max_attempts: usize,
    uniques: Vec<usize>,
    multis: Vec<usize>,
}

impl<'a> SlotAllocator<'a> {
    pub fn new(stations: &'a StationSet, n_people: usize, max_attempts: usize) -> Self {
        Self {
            stations,
            n_people,
            max_attempts: max_attempts.max(1),
            uniques: stations.indices_of(StationKind::Unique),
            multis: stations.indices_of(StationKind::Multi),
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Resolves slot `slot`, or `None` if every attempt failed.
    pub fn allocate(
        &self,
        slot: usize,
        previous: Option<&SlotAssignment>,
        weights: &WeightMatrix,
        rng: &mut RotationRng,
    ) -> Option<SlotAssignment> {
        for attempt in 0..self.max_attempts {
            if let Some(assignment) = self.attempt(previous, weights, rng) {
                debug!("slot {slot}: accepted on attempt {}", attempt + 1);
                return Some(assignment);
            }
            trace!("slot {slot}: attempt {} rejected", attempt + 1);
        }
        debug!("slot {slot}: no valid assignment after {} attempts", self.max_attempts);
        None
    }

    fn attempt(
        &self,
        previous: Option<&SlotAssignment>,
        weights: &WeightMatrix,
        rng: &mut RotationRng,
    ) -> Option<SlotAssignment> {
        let mut remaining: Vec<usize> = (0..self.n_people).collect();
        rng.shuffle(&mut remaining);

        let mut placed: Vec<Option<usize>> = vec![None; self.n_people];
        let mut unique_filled = vec![false; self.stations.len()];

        for &station in &self.uniques {
            let person = self.draw_eligible(&remaining, station, previous, rng)?;
            placed[person] = Some(station);
            unique_filled[station] = true;
            remaining.retain(|&p| p != person);
        }

        if !self.multis.is_empty() && remaining.len() >= self.multis.len() {
            for &station in &self.multis {
                let person = self.draw_eligible(&remaining, station, previous, rng)?;
                placed[person] = Some(station);
                remaining.retain(|&p| p != person);
            }
        }

        for &person in &remaining {
            let legal: Vec<usize> = (0..self.stations.len())
                .filter(|&s| {
                    !(self.stations.kind(s) == StationKind::Unique && unique_filled[s])
                        && !self.is_blocked(person, s, previous)
                })
                .collect();
            if legal.is_empty() {
                trace!("person {person}: no legal station");
                return None;
            }

            let station = weighted_choice(&legal, weights.row(person), rng);
            placed[person] = Some(station);
            if self.stations.kind(station) == StationKind::Unique {
                unique_filled[station] = true;
            }
        }

        let assignment = SlotAssignment::new(placed.into_iter().collect::<Option<Vec<_>>>()?);
        if self.uniques.iter().all(|&u| assignment.holders(u) == 1) {
            Some(assignment)
        } else {
            None
        }
    }

    /// Uniformly draws an unblocked person for `station` from `candidates`.
    fn draw_eligible(
        &self,
        candidates: &[usize],
        station: usize,
        previous: Option<&SlotAssignment>,
        rng: &mut RotationRng,
    ) -> Option<usize> {
        let eligible: Vec<usize> = candidates
            .iter()
            .copied()
            .filter(|&p| !self.is_blocked(p, station, previous))
            .collect();
        if eligible.is_empty() {
            trace!("station {}: no eligible person", self.stations.name(station));
            return None;
        }
        Some(eligible[rng.index(eligible.len())])
    }

    /// Whether `person` may not take `station` because they held this
    /// Unique station in the previous slot.
    fn is_blocked(&self, person: usize, station: usize, previous: Option<&SlotAssignment>) -> bool {
        self.stations.kind(station) == StationKind::Unique
            && previous.is_some_and(|prev| prev.station_of(person) == station)
    }
}

/// Draws one of `legal` with probability proportional to `row[s]`.
///
/// Negative weights count as zero. If the total is not positive the draw
/// is uniform over `legal`. `legal` must be non-empty.
pub fn weighted_choice(legal: &[usize], row: &[f64], rng: &mut RotationRng) -> usize {
    let weights: Vec<f64> = legal.iter().map(|&s| row[s].max(0.0)).collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return legal[rng.index(legal.len())];
    }

    let roll = rng.next_f64();
    let mut accumulated = 0.0;
    for (i, w) in weights.iter().enumerate() {
        accumulated += w / total;
        if roll <= accumulated {
            return legal[i];
        }
    }
    legal[legal.len() - 1]
}
