//! Rotation engine: randomized, constraint-bound station allocation.
//!
//! Turns a roster, a station list, and an ordered list of time slots for
//! one calendar day into a schedule that gives every available person
//! one station per slot.
//!
//! # Components
//!
//! | Component | Role |
//! |-----------|------|
//! | `availability` | Roster → people available on the date |
//! | `rng` | Date-seeded or entropy-backed uniform stream |
//! | `StationSet` | Classified effective stations (Unique / Multi / Normal) |
//! | `WeightMatrix` | Per-(person, station) bias, updated after every slot |
//! | `SlotAllocator` | Bounded randomized search for one slot |
//! | `ScheduleGenerator` | Preconditions, slot loop, result assembly |
//! | `RotationKpi` | Fairness and validity metrics on a finished schedule |
//!
//! # Hard Rules
//!
//! - Every Unique station is held by exactly one person in every slot.
//! - Nobody holds the same Unique station in two consecutive slots.
//! - Multi stations are dropped when two or fewer people are available.
//!
//! Everything else (spreading people across stations over the day) is
//! soft and driven by the weight matrix.

mod allocator;
pub mod availability;
mod config;
mod diagnostic;
mod generator;
mod kpi;
pub mod rng;
mod stations;
mod weights;

pub use allocator::{weighted_choice, SlotAllocator, SlotAssignment};
pub use config::{GeneratorConfig, WeightPolicy};
pub use diagnostic::{
    Diagnostic, DiagnosticKind, DiagnosticLog, DiagnosticSink, GenerationError, Severity,
};
pub use generator::{generate, GenerationMode, RotationRequest, ScheduleGenerator};
pub use kpi::RotationKpi;
pub use rng::{Mulberry32, RotationRng};
pub use stations::StationSet;
pub use weights::WeightMatrix;
