//! Input validation for rotation problems.
//!
//! Checks structural integrity of the roster, station list, and slot
//! labels before generation. Detects:
//! - Empty person or station names
//! - Duplicate person names
//! - Duplicate station names
//! - Duplicate time slot labels
//!
//! Capacity feasibility (enough people for the unique stations, etc.)
//! is not checked here; it depends on the date and is handled by the
//! generator.

use crate::models::{Person, Station};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two people or two stations share the same name.
    DuplicateName,
    /// A person or station has an empty name.
    EmptyName,
    /// Two time slots share the same label.
    DuplicateSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the inputs of a rotation problem.
///
/// Checks:
/// 1. Every person has a non-empty name
/// 2. No duplicate person names (inactive people included)
/// 3. Every station has a non-empty name
/// 4. No duplicate station names
/// 5. No duplicate time slot labels
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    people: &[Person],
    stations: &[Station],
    time_slots: &[String],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut person_names = HashSet::new();
    for (i, p) in people.iter().enumerate() {
        if p.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Person at position {i} has an empty name"),
            ));
            continue;
        }
        if !person_names.insert(p.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate person name: {}", p.name),
            ));
        }
    }

    let mut station_names = HashSet::new();
    for (i, s) in stations.iter().enumerate() {
        if s.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                format!("Station at position {i} has an empty name"),
            ));
            continue;
        }
        if !station_names.insert(s.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate station name: {}", s.name),
            ));
        }
    }

    let mut labels = HashSet::new();
    for label in time_slots {
        if !labels.insert(label.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateSlot,
                format!("Duplicate time slot: {label}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
