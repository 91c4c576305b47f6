//! Effective station set.
//!
//! The station list a run allocates against, with each station's kind
//! computed once. Fixed for the whole run after Multi elision.

use crate::models::{classify, Station, StationKind};

/// Classified stations, indexed by position.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSet {
    stations: Vec<Station>,
    kinds: Vec<StationKind>,
}

impl StationSet {
    /// Classifies `stations`, keeping their order.
    pub fn new(stations: &[Station]) -> Self {
        Self {
            stations: stations.to_vec(),
            kinds: stations.iter().map(classify).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    #[inline]
    pub fn name(&self, idx: usize) -> &str {
        &self.stations[idx].name
    }

    #[inline]
    pub fn kind(&self, idx: usize) -> StationKind {
        self.kinds[idx]
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    /// Indices of stations of `kind`, in configured order.
    pub fn indices_of(&self, kind: StationKind) -> Vec<usize> {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| **k == kind)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of stations of `kind`.
    pub fn count(&self, kind: StationKind) -> usize {
        self.kinds.iter().filter(|k| **k == kind).count()
    }

    /// Names of stations of `kind`.
    pub fn names_of(&self, kind: StationKind) -> Vec<String> {
        self.indices_of(kind)
            .into_iter()
            .map(|i| self.stations[i].name.clone())
            .collect()
    }

    /// Copy of this set with every Multi station removed.
    pub fn without_multi(&self) -> Self {
        let kept: Vec<Station> = self
            .stations
            .iter()
            .zip(&self.kinds)
            .filter(|(_, k)| **k != StationKind::Multi)
            .map(|(s, _)| s.clone())
            .collect();
        Self::new(&kept)
    }
}
