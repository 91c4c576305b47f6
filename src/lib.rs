//! Daily shift rotation engine.
//!
//! Given a roster, a set of work stations with capacity rules, and an
//! ordered list of time slots for one calendar day, produces an
//! assignment of one station per person per slot that satisfies the hard
//! capacity rules while spreading people fairly across stations.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Person`, `DayOff`, `Station`,
//!   `StationKind`, `Schedule`, `PersonSchedule`
//! - **`validation`**: Input integrity checks (empty and duplicate names,
//!   duplicate slot labels)
//! - **`rotation`**: The engine — availability filter, random streams,
//!   weight matrix, slot allocator, generator, diagnostics, KPIs
//!
//! # Determinism
//!
//! In [`GenerationMode::Seeded`] the random stream is a pure function of
//! the date string, so identical inputs always give identical schedules.
//!
//! # Example
//!
//! ```
//! use shift_rotation::models::{Person, Station};
//! use shift_rotation::{generate, GenerationMode};
//!
//! let people = vec![Person::new("A"), Person::new("B"), Person::new("C")];
//! let stations = vec![Station::unique("X"), Station::unique("Y"), Station::normal("Z")];
//! let slots = vec!["09:00".to_string(), "10:00".to_string()];
//!
//! let mut warnings = Vec::new();
//! let mut sink = |d: &shift_rotation::Diagnostic| warnings.push(d.message.clone());
//! let mode = GenerationMode::Seeded;
//! let schedule = generate(&people, &stations, "2024-01-01", mode, &slots, &mut sink)
//!     .expect("feasible");
//! assert_eq!(schedule.people.len(), 3);
//! ```

pub mod models;
pub mod rotation;
pub mod validation;

pub use rotation::{
    generate, Diagnostic, DiagnosticKind, DiagnosticSink, GenerationError, GenerationMode,
    GeneratorConfig, RotationRequest, ScheduleGenerator, Severity, WeightPolicy,
};
