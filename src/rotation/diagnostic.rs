//! Diagnostics and generation errors.
//!
//! Every warning or failure produced during generation is delivered to
//! a caller-supplied [`DiagnosticSink`]. Fatal outcomes are additionally
//! returned as a typed [`GenerationError`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::validation::ValidationError;

/// Diagnostic severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Fewer than two people are available.
    InsufficientPeople,
    /// Fewer available people than Unique stations.
    InsufficientForUniqueStations,
    /// Multi stations were dropped because too few people are available.
    MultiStationsElided,
    /// A slot could not be filled within the attempt budget.
    SlotUnsatisfiable,
    /// The date is not a valid `YYYY-MM-DD` calendar date.
    InvalidDate,
    /// Roster, station, or slot input failed structural validation.
    InvalidInput,
}

/// A single diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub severity: Severity,
    pub message: String,
}

/// Receives diagnostics during generation.
///
/// Any `FnMut(&Diagnostic)` closure is a sink.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: &Diagnostic);
}

impl<F> DiagnosticSink for F
where
    F: FnMut(&Diagnostic),
{
    fn report(&mut self, diagnostic: &Diagnostic) {
        self(diagnostic)
    }
}

/// A sink that records every diagnostic it receives.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticLog {
    entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded diagnostics, in report order.
    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    /// Whether a diagnostic of `kind` was recorded.
    pub fn contains(&self, kind: DiagnosticKind) -> bool {
        self.entries.iter().any(|d| d.kind == kind)
    }

    /// Recorded diagnostics at `severity`.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |d| d.severity == severity)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl DiagnosticSink for DiagnosticLog {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.entries.push(diagnostic.clone());
    }
}

/// A fatal generation outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error(
        "At least 2 available people are needed to generate a schedule ({available} available)."
    )]
    InsufficientPeople { available: usize },

    #[error("Not enough available people to fill unique stations ({}).", .stations.join(", "))]
    InsufficientForUniqueStations {
        available: usize,
        stations: Vec<String>,
    },

    #[error("Could not generate valid schedule for time slot {label} after {attempts} attempts.")]
    SlotUnsatisfiable {
        slot: usize,
        label: String,
        attempts: usize,
    },

    #[error("Invalid date '{date}': expected YYYY-MM-DD.")]
    InvalidDate { date: String },

    #[error("Invalid input: {}", join_messages(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

impl GenerationError {
    /// Diagnostic category of this error.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            GenerationError::InsufficientPeople { .. } => DiagnosticKind::InsufficientPeople,
            GenerationError::InsufficientForUniqueStations { .. } => {
                DiagnosticKind::InsufficientForUniqueStations
            }
            GenerationError::SlotUnsatisfiable { .. } => DiagnosticKind::SlotUnsatisfiable,
            GenerationError::InvalidDate { .. } => DiagnosticKind::InvalidDate,
            GenerationError::InvalidInput(_) => DiagnosticKind::InvalidInput,
        }
    }

    /// Converts this error into an Error-severity diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.kind(), self.to_string())
    }
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
        }
    }

    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Warning, message)
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(kind, Severity::Error, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.severity, self.message)
    }
}

impl From<&GenerationError> for Diagnostic {
    fn from(err: &GenerationError) -> Self {
        err.to_diagnostic()
    }
}
