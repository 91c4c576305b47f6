//! Schedule generator: drives a full one-day rotation.
//!
//! # Algorithm
//!
//! 1. Validate inputs and parse the date.
//! 2. Filter the roster to people available on the date's weekday.
//! 3. Check preconditions (at least two people, enough people for the
//!    Unique stations); drop Multi stations when two or fewer people
//!    are available.
//! 4. For each slot in order, allocate against the previous slot's
//!    assignment, append the result, and update the weight matrix.
//!
//! Any slot that cannot be filled aborts the run; partial schedules are
//! never returned.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::availability::{available_names, weekday_of};
use super::{
    Diagnostic, DiagnosticKind, DiagnosticSink, GenerationError, GeneratorConfig, RotationRng,
    SlotAllocator, SlotAssignment, StationSet, WeightMatrix,
};
use crate::models::{Person, PersonSchedule, Schedule, Station, StationKind};
use crate::validation::validate_input;

/// How the random stream is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GenerationMode {
    /// Seeded from the date: same date, same schedule.
    #[default]
    Seeded,
    /// Fresh OS entropy per run.
    Random,
    /// Host-side hand editing. The engine is only asked to rebuild the
    /// skeleton, which it does exactly as in `Seeded` mode.
    Manual,
}

/// Input container for one generation run.
#[derive(Debug, Clone)]
pub struct RotationRequest {
    /// Full roster (unavailable people are filtered out).
    pub people: Vec<Person>,
    /// Configured stations.
    pub stations: Vec<Station>,
    /// ISO-8601 calendar date (YYYY-MM-DD).
    pub date: String,
    /// Random stream selection.
    pub mode: GenerationMode,
    /// Ordered, distinct slot labels.
    pub time_slots: Vec<String>,
}

impl RotationRequest {
    /// Creates a seeded-mode request with no slots.
    pub fn new(people: Vec<Person>, stations: Vec<Station>, date: impl Into<String>) -> Self {
        Self {
            people,
            stations,
            date: date.into(),
            mode: GenerationMode::Seeded,
            time_slots: Vec::new(),
        }
    }

    /// Sets the generation mode.
    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the slot labels.
    pub fn with_time_slots<I, S>(mut self, time_slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.time_slots = time_slots.into_iter().map(Into::into).collect();
        self
    }
}

/// Generates daily rotations.
///
/// # Example
///
/// ```
/// use shift_rotation::models::{Person, Station};
/// use shift_rotation::rotation::DiagnosticLog;
/// use shift_rotation::{RotationRequest, ScheduleGenerator};
///
/// let request = RotationRequest::new(
///     vec![Person::new("A"), Person::new("B"), Person::new("C")],
///     vec![Station::unique("X"), Station::unique("Y"), Station::normal("Z")],
///     "2024-01-01",
/// )
/// .with_time_slots(["09:00", "10:00"]);
///
/// let mut log = DiagnosticLog::new();
/// let schedule = ScheduleGenerator::new().generate(&request, &mut log).unwrap();
/// assert_eq!(schedule.slot_count(), 2);
/// assert_eq!(schedule.holders("X", 0).len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    config: GeneratorConfig,
}

impl ScheduleGenerator {
    /// Creates a generator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates a schedule, reporting every warning and error to `sink`.
    ///
    /// Returns `None` on any fatal outcome; the sink has then received
    /// exactly one Error-severity diagnostic describing it.
    pub fn generate<S: DiagnosticSink + ?Sized>(
        &self,
        request: &RotationRequest,
        sink: &mut S,
    ) -> Option<Schedule> {
        match self.run(request, sink) {
            Ok(schedule) => Some(schedule),
            Err(err) => {
                debug!("generation aborted: {err}");
                sink.report(&err.to_diagnostic());
                None
            }
        }
    }

    /// Generates a schedule, returning fatal outcomes as typed errors.
    ///
    /// Warnings go to `sink`; errors are reported to `sink` and returned.
    pub fn try_generate<S: DiagnosticSink + ?Sized>(
        &self,
        request: &RotationRequest,
        sink: &mut S,
    ) -> Result<Schedule, GenerationError> {
        self.run(request, sink).inspect_err(|err| sink.report(&err.to_diagnostic()))
    }

    fn run<S: DiagnosticSink + ?Sized>(
        &self,
        request: &RotationRequest,
        sink: &mut S,
    ) -> Result<Schedule, GenerationError> {
        validate_input(&request.people, &request.stations, &request.time_slots)
            .map_err(GenerationError::InvalidInput)?;
        let weekday = weekday_of(&request.date)?;

        let names = available_names(&request.people, weekday);
        debug!(
            "date {} ({weekday}): {} of {} people available",
            request.date,
            names.len(),
            request.people.len()
        );

        if names.len() < 2 {
            return Err(GenerationError::InsufficientPeople {
                available: names.len(),
            });
        }

        let configured = StationSet::new(&request.stations);
        check_unique_capacity(&configured, names.len())?;

        let stations = if configured.count(StationKind::Multi) > 0 && names.len() <= 2 {
            let removed = configured.names_of(StationKind::Multi).join(", ");
            let message = format!(
                "Only {} people available. Multiple stations removed: {removed}",
                names.len()
            );
            warn!("{message}");
            sink.report(&Diagnostic::warning(DiagnosticKind::MultiStationsElided, message));

            let reduced = configured.without_multi();
            check_unique_capacity(&reduced, names.len())?;
            reduced
        } else {
            configured
        };

        debug!(
            "effective stations: {:?}, mode {:?}",
            stations.stations().iter().map(|s| s.name.as_str()).collect::<Vec<_>>(),
            request.mode
        );

        let (people, _) = self.rotate(request, &names, &stations)?;
        Ok(Schedule {
            date: request.date.clone(),
            people,
        })
    }

    /// Allocates every slot in order, carrying one weight matrix across
    /// the whole run. Returns the per-person sequences and the final
    /// weights.
    fn rotate(
        &self,
        request: &RotationRequest,
        names: &[String],
        stations: &StationSet,
    ) -> Result<(Vec<PersonSchedule>, WeightMatrix), GenerationError> {
        let mut rng = match request.mode {
            GenerationMode::Random => RotationRng::entropy(),
            GenerationMode::Seeded | GenerationMode::Manual => RotationRng::seeded(&request.date),
        };
        let mut weights = WeightMatrix::new(names.len(), stations.len());
        let allocator = SlotAllocator::new(stations, names.len(), self.config.max_attempts);

        let mut sequences: Vec<PersonSchedule> =
            names.iter().map(|n| PersonSchedule::new(n.as_str())).collect();
        let mut previous: Option<SlotAssignment> = None;

        for (slot, label) in request.time_slots.iter().enumerate() {
            let assignment = allocator
                .allocate(slot, previous.as_ref(), &weights, &mut rng)
                .ok_or_else(|| GenerationError::SlotUnsatisfiable {
                    slot,
                    label: label.clone(),
                    attempts: allocator.max_attempts(),
                })?;

            for (person, station) in assignment.pairs() {
                sequences[person].push(stations.name(station));
                weights.record(person, station, stations, &self.config.weights);
            }
            debug!("slot {slot} ({label}) allocated");

            previous = Some(assignment);
        }

        Ok((sequences, weights))
    }
}

fn check_unique_capacity(stations: &StationSet, available: usize) -> Result<(), GenerationError> {
    if available < stations.count(StationKind::Unique) {
        return Err(GenerationError::InsufficientForUniqueStations {
            available,
            stations: stations.names_of(StationKind::Unique),
        });
    }
    Ok(())
}

/// Generates a one-day rotation with the default configuration.
///
/// Every warning and failure is reported to `sink` as a [`Diagnostic`];
/// `None` means the inputs could not be scheduled.
pub fn generate<S: DiagnosticSink + ?Sized>(
    people: &[Person],
    stations: &[Station],
    date: &str,
    mode: GenerationMode,
    time_slots: &[String],
    sink: &mut S,
) -> Option<Schedule> {
    let request = RotationRequest {
        people: people.to_vec(),
        stations: stations.to_vec(),
        date: date.to_string(),
        mode,
        time_slots: time_slots.to_vec(),
    };
    ScheduleGenerator::new().generate(&request, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DayOff;
    use crate::rotation::{DiagnosticLog, Severity};
    use chrono::Weekday;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn slots(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    fn abc() -> Vec<Person> {
        vec![Person::new("A"), Person::new("B"), Person::new("C")]
    }

    fn xyz() -> Vec<Station> {
        vec![Station::unique("X"), Station::unique("Y"), Station::normal("Z")]
    }

    fn assert_unique_coverage(schedule: &Schedule, stations: &[Station]) {
        for slot in 0..schedule.slot_count() {
            for s in stations.iter().filter(|s| s.unique) {
                assert_eq!(
                    schedule.holders(&s.name, slot).len(),
                    1,
                    "station {} in slot {slot}",
                    s.name
                );
            }
        }
    }

    fn assert_no_unique_repeat(schedule: &Schedule, stations: &[Station]) {
        let unique: HashSet<&str> = stations
            .iter()
            .filter(|s| s.unique)
            .map(|s| s.name.as_str())
            .collect();
        for p in &schedule.people {
            for pair in p.stations.windows(2) {
                if unique.contains(pair[0].as_str()) {
                    assert_ne!(pair[0], pair[1], "{} repeated {}", p.name, pair[0]);
                }
            }
        }
    }

    #[test]
    fn test_reference_example() {
        let mut log = DiagnosticLog::new();
        let schedule = generate(
            &abc(),
            &xyz(),
            "2024-01-01",
            GenerationMode::Seeded,
            &slots(&["09:00", "10:00"]),
            &mut log,
        )
        .unwrap();

        assert!(log.is_empty());
        assert_eq!(schedule.date, "2024-01-01");
        assert_eq!(schedule.people.len(), 3);
        for slot in 0..2 {
            let x = schedule.holders("X", slot);
            let y = schedule.holders("Y", slot);
            let z = schedule.holders("Z", slot);
            assert_eq!(x.len(), 1);
            assert_eq!(y.len(), 1);
            assert_eq!(z.len(), 1);
            assert_ne!(x[0], y[0]);
        }
        assert_no_unique_repeat(&schedule, &xyz());

        let again = generate(
            &abc(),
            &xyz(),
            "2024-01-01",
            GenerationMode::Seeded,
            &slots(&["09:00", "10:00"]),
            &mut DiagnosticLog::new(),
        )
        .unwrap();
        assert_eq!(again, schedule);
    }

    #[test]
    fn test_manual_mode_matches_seeded() {
        let base = RotationRequest::new(abc(), xyz(), "2024-07-04")
            .with_time_slots(["a", "b", "c", "d"]);
        let generator = ScheduleGenerator::new();

        let seeded = generator.generate(&base, &mut DiagnosticLog::new()).unwrap();
        let manual = generator
            .generate(
                &base.clone().with_mode(GenerationMode::Manual),
                &mut DiagnosticLog::new(),
            )
            .unwrap();
        assert_eq!(seeded, manual);
    }

    #[test]
    fn test_random_mode_still_valid() {
        let request = RotationRequest::new(abc(), xyz(), "2024-01-01")
            .with_mode(GenerationMode::Random)
            .with_time_slots(["1", "2", "3", "4", "5"]);
        let schedule = ScheduleGenerator::new()
            .generate(&request, &mut DiagnosticLog::new())
            .unwrap();
        assert_eq!(schedule.slot_count(), 5);
        assert_unique_coverage(&schedule, &xyz());
        assert_no_unique_repeat(&schedule, &xyz());
    }

    #[test]
    fn test_single_person_is_insufficient() {
        let mut log = DiagnosticLog::new();
        let people = vec![Person::new("A"), Person::new("B").inactive()];
        let result = generate(
            &people,
            &xyz(),
            "2024-01-01",
            GenerationMode::Seeded,
            &slots(&["09:00"]),
            &mut log,
        );

        assert!(result.is_none());
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].kind, DiagnosticKind::InsufficientPeople);
        assert_eq!(log.entries()[0].severity, Severity::Error);
    }

    #[test]
    fn test_too_few_for_unique_stations() {
        let stations = vec![
            Station::unique("X"),
            Station::unique("Y"),
            Station::unique("W"),
            Station::unique("V"),
        ];
        let request = RotationRequest::new(abc(), stations, "2024-01-01").with_time_slots(["1"]);
        let err = ScheduleGenerator::new()
            .try_generate(&request, &mut DiagnosticLog::new())
            .unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::InsufficientForUniqueStations);
    }

    #[test]
    fn test_multi_elided_with_two_people() {
        let mut log = DiagnosticLog::new();
        let people = vec![Person::new("A"), Person::new("B")];
        let stations = vec![Station::unique("X"), Station::multi("M"), Station::normal("Z")];
        let schedule = generate(
            &people,
            &stations,
            "2024-01-01",
            GenerationMode::Seeded,
            &slots(&["1", "2", "3", "4"]),
            &mut log,
        )
        .unwrap();

        assert!(log.contains(DiagnosticKind::MultiStationsElided));
        assert_eq!(log.with_severity(Severity::Warning).count(), 1);
        assert!(schedule
            .people
            .iter()
            .all(|p| p.stations.iter().all(|s| s != "M")));
        assert_unique_coverage(&schedule, &stations);
    }

    #[test]
    fn test_slot_unsatisfiable_aborts_whole_run() {
        // Three people, only unique stations: the leftover person has nowhere to go.
        let mut log = DiagnosticLog::new();
        let stations = vec![Station::unique("X"), Station::unique("Y")];
        let request = RotationRequest::new(abc(), stations, "2024-01-01")
            .with_time_slots(["09:00", "10:00"]);
        let generator =
            ScheduleGenerator::new().with_config(GeneratorConfig::default().with_max_attempts(20));

        let err = generator.try_generate(&request, &mut log).unwrap_err();
        assert_eq!(
            err,
            GenerationError::SlotUnsatisfiable {
                slot: 0,
                label: "09:00".into(),
                attempts: 20,
            }
        );
        assert!(log.contains(DiagnosticKind::SlotUnsatisfiable));
    }

    #[test]
    fn test_availability_respected() {
        // 2024-01-01 is a Monday.
        let people = vec![
            Person::new("A"),
            Person::new("B").inactive(),
            Person::new("C").with_day_off(Weekday::Mon),
            Person::new("D").with_day_off("Terça"),
            Person::new("E").with_day_off(DayOff::None),
        ];
        let schedule = generate(
            &people,
            &xyz(),
            "2024-01-01",
            GenerationMode::Seeded,
            &slots(&["1", "2"]),
            &mut DiagnosticLog::new(),
        )
        .unwrap();

        let names: Vec<&str> = schedule.people.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "D", "E"]);
    }

    #[test]
    fn test_weights_accumulate_across_slots() {
        let stations = vec![
            Station::unique("X"),
            Station::multi("M"),
            Station::normal("Z1"),
            Station::normal("Z2"),
        ];
        let people = vec![
            Person::new("A"),
            Person::new("B"),
            Person::new("C"),
            Person::new("D"),
        ];
        let labels: Vec<String> = (0..12).map(|h| format!("{:02}:00", h + 8)).collect();
        let request = RotationRequest::new(people, stations.clone(), "2024-04-02")
            .with_time_slots(labels.clone());
        let names: Vec<String> = request.people.iter().map(|p| p.name.clone()).collect();
        let set = StationSet::new(&stations);
        let generator = ScheduleGenerator::new();

        let (sequences, weights) = generator.rotate(&request, &names, &set).unwrap();
        assert_ne!(weights, WeightMatrix::new(names.len(), set.len()));

        // Replaying the produced schedule slot by slot gives the same matrix.
        let mut replay = WeightMatrix::new(names.len(), set.len());
        for slot in 0..labels.len() {
            for (person, seq) in sequences.iter().enumerate() {
                let station = (0..set.len())
                    .find(|&s| set.name(s) == seq.stations[slot])
                    .unwrap();
                replay.record(person, station, &set, &generator.config().weights);
            }
        }
        assert_eq!(weights, replay);
        let multi_total: usize = (0..names.len()).map(|p| weights.multi_count(p)).sum();
        assert!(multi_total >= labels.len());
    }

    #[test]
    fn test_invalid_date_and_input() {
        let mut log = DiagnosticLog::new();
        let mode = GenerationMode::Seeded;
        let bad_date = generate(&abc(), &xyz(), "2024-13-01", mode, &[], &mut log);
        assert!(bad_date.is_none());
        assert!(log.contains(DiagnosticKind::InvalidDate));

        let mut log = DiagnosticLog::new();
        let dupes = vec![Station::normal("Z"), Station::normal("Z")];
        let bad_input = generate(&abc(), &dupes, "2024-01-01", mode, &[], &mut log);
        assert!(bad_input.is_none());
        assert!(log.contains(DiagnosticKind::InvalidInput));
    }

    #[test]
    fn test_no_slots_gives_empty_sequences() {
        let schedule = generate(
            &abc(),
            &xyz(),
            "2024-01-01",
            GenerationMode::Seeded,
            &[],
            &mut DiagnosticLog::new(),
        )
        .unwrap();
        assert_eq!(schedule.people.len(), 3);
        assert!(schedule.people.iter().all(|p| p.stations.is_empty()));
    }

    #[test]
    fn test_closure_sink_receives_message_and_severity() {
        let mut seen: Vec<(String, Severity)> = Vec::new();
        let mut sink = |d: &Diagnostic| seen.push((d.message.clone(), d.severity));
        let people = vec![Person::new("A")];
        let mode = GenerationMode::Seeded;
        let result = generate(&people, &xyz(), "2024-01-01", mode, &[], &mut sink);
        assert!(result.is_none());
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].1, Severity::Error);
        assert!(seen[0].0.contains("At least 2"));
    }

    fn roster_strategy() -> impl Strategy<Value = Vec<Person>> {
        prop::collection::vec((any::<bool>(), 0usize..8), 2..9).prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (active, day))| {
                    let day_off = match day {
                        0 => DayOff::Day(Weekday::Sun),
                        1 => DayOff::Day(Weekday::Mon),
                        2 => DayOff::Day(Weekday::Tue),
                        3 => DayOff::Day(Weekday::Wed),
                        _ => DayOff::None,
                    };
                    Person::new(format!("P{i}"))
                        .with_active(active)
                        .with_day_off(day_off)
                })
                .collect()
        })
    }

    fn date_strategy() -> impl Strategy<Value = String> {
        (2020i32..2030, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"))
    }

    proptest! {
        #[test]
        fn prop_seeded_generation_is_deterministic(
            people in roster_strategy(),
            date in date_strategy(),
            n_slots in 0usize..6,
        ) {
            let stations = vec![Station::unique("X"), Station::multi("M"), Station::normal("Z")];
            let labels: Vec<String> = (0..n_slots).map(|i| format!("S{i}")).collect();

            let mode = GenerationMode::Seeded;
            let a = generate(&people, &stations, &date, mode, &labels, &mut DiagnosticLog::new());
            let b = generate(&people, &stations, &date, mode, &labels, &mut DiagnosticLog::new());
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_generated_schedules_hold_invariants(
            people in roster_strategy(),
            date in date_strategy(),
            n_slots in 1usize..8,
        ) {
            let stations = vec![
                Station::unique("X"),
                Station::unique("Y"),
                Station::multi("M"),
                Station::normal("Z"),
            ];
            let labels: Vec<String> = (0..n_slots).map(|i| format!("S{i}")).collect();
            let weekday = weekday_of(&date).unwrap();

            let mut log = DiagnosticLog::new();
            let mode = GenerationMode::Seeded;
            let result = generate(&people, &stations, &date, mode, &labels, &mut log);

            let available: Vec<&Person> =
                people.iter().filter(|p| p.is_available_on(weekday)).collect();
            match result {
                Some(schedule) => {
                    prop_assert!(available.len() >= 2);
                    prop_assert_eq!(schedule.people.len(), available.len());
                    for (p, s) in available.iter().zip(&schedule.people) {
                        prop_assert_eq!(&p.name, &s.name);
                        prop_assert_eq!(s.stations.len(), n_slots);
                    }
                    assert_unique_coverage(&schedule, &stations);
                    assert_no_unique_repeat(&schedule, &stations);
                    if available.len() == 2 {
                        prop_assert!(log.contains(DiagnosticKind::MultiStationsElided));
                        let on_multi =
                            schedule.people.iter().any(|p| p.stations.iter().any(|s| s == "M"));
                        prop_assert!(!on_multi);
                    }
                }
                None => {
                    prop_assert_eq!(log.with_severity(Severity::Error).count(), 1);
                    if available.len() < 2 {
                        prop_assert!(log.contains(DiagnosticKind::InsufficientPeople));
                    }
                }
            }
        }
    }
}
