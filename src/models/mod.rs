//! Rotation domain models.
//!
//! Provides the input and output data types of the rotation engine.
//! Inputs (`Person`, `Station`) are read-only to the engine; the output
//! (`Schedule`) is created once per successful run.
//!
//! # Domain Mappings
//!
//! | shift-rotation | Retail | Security | Healthcare |
//! |----------------|--------|----------|------------|
//! | Person | Clerk | Guard | Nurse |
//! | Station | Register/Floor | Gate/Patrol | Triage/Ward |
//! | Slot | Hour block | Watch | Round |
//! | Schedule | Daily rota | Duty roster | Shift board |

mod person;
mod schedule;
mod station;

pub use person::{DayOff, Person};
pub use schedule::{PersonSchedule, Schedule};
pub use station::{classify, Station, StationKind};
