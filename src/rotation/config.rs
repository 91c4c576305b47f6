//! Generator configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the rotation generator.
///
/// # Attempt Budget
///
/// Each slot is resolved by repeated randomized trials without
/// backtracking. `max_attempts` caps the trials per slot; some
/// configurations that admit a valid assignment can still fail when a
/// valid draw is statistically rare within the budget.
///
/// # Examples
///
/// ```
/// use shift_rotation::GeneratorConfig;
///
/// let config = GeneratorConfig::default().with_max_attempts(500);
/// assert_eq!(config.max_attempts, 500);
/// assert_eq!(config.weights.unique_floor, 0.001);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Maximum randomized trials per slot (at least 1).
    pub max_attempts: usize,

    /// Weight update policy applied after each slot.
    pub weights: WeightPolicy,
}

/// Tuned constants for the per-slot weight update.
///
/// # Update Rules
///
/// After a slot is accepted, for each person `P` placed on station `S`:
/// - **Unique**: `w(P,S) = unique_floor`.
/// - **Multi**: `w(P,S) = max(multi_floor, w(P,S) * multi_damping)`;
///   every other `w(P,·) *= multi_boost`; and once `P` has held Multi
///   stations at least `unique_pull_after` times (current slot included),
///   every `w(P,U) *= unique_pull_boost` for Unique stations `U`. With the
///   default of 1 the pull applies on every Multi assignment.
/// - **Normal**: `w(P,S) = max(normal_floor, w(P,S) * normal_damping)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightPolicy {
    /// Value a person's weight toward a just-held Unique station drops to.
    pub unique_floor: f64,

    /// Damping applied to a just-held Multi station.
    pub multi_damping: f64,

    /// Lower bound after Multi damping.
    pub multi_floor: f64,

    /// Boost applied to every other station after a Multi assignment.
    pub multi_boost: f64,

    /// Boost toward Unique stations for people repeatedly on Multi stations.
    pub unique_pull_boost: f64,

    /// Multi assignment count (current slot included) at which the pull
    /// starts to apply.
    pub unique_pull_after: usize,

    /// Damping applied to a just-held Normal station.
    pub normal_damping: f64,

    /// Lower bound after Normal damping.
    pub normal_floor: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: 300,
            weights: WeightPolicy::default(),
        }
    }
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            unique_floor: 0.001,
            multi_damping: 0.3,
            multi_floor: 0.2,
            multi_boost: 1.5,
            unique_pull_boost: 3.0,
            unique_pull_after: 1,
            normal_damping: 0.5,
            normal_floor: 0.1,
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_attempts(mut self, n: usize) -> Self {
        self.max_attempts = n.max(1);
        self
    }

    pub fn with_weights(mut self, weights: WeightPolicy) -> Self {
        self.weights = weights;
        self
    }
}
