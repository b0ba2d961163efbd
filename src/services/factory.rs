// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout construction from raw form input.
//!
//! Raw field text is coerced to numbers the way a browser does (`+value`),
//! then checked:
//! 1. every field must be finite
//! 2. distance and duration must be positive, and so must cadence for runs
//!
//! Elevation gain for rides may be zero or negative.

use crate::models::{Coords, KindInput, Workout, WorkoutId, WorkoutKind};
use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ids keep the last ten digits of the millisecond timestamp.
const ID_MODULUS: u64 = 10_000_000_000;

/// Raw values read from the workout form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWorkoutInput {
    pub kind: WorkoutKind,
    pub distance: String,
    pub duration: String,
    /// Cadence for running, elevation gain for cycling
    pub third: String,
}

/// Form field named in a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Distance,
    Duration,
    Cadence,
    Elevation,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Distance => "distance",
            Field::Duration => "duration",
            Field::Cadence => "cadence",
            Field::Elevation => "elevation gain",
        })
    }
}

/// Rejected form input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid Entry: {field} must be a number")]
    NonFinite { field: Field },

    #[error("Invalid Entry: {field} must be a positive number")]
    NonPositive { field: Field },
}

/// Coerce form text to a number.
///
/// Blank text is 0 and anything unparseable is NaN, matching browser
/// numeric coercion. Unsigned `0x`, `0o` and `0b` literals are read in
/// their radix, as a browser does.
pub fn coerce(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }

    let radix = match trimmed.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return parse_radix(&trimmed[2..], radix);
    }

    trimmed.parse().unwrap_or(f64::NAN)
}

/// Digits in `radix` with no sign or separators; NaN otherwise.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0.0_f64, |acc, c| {
            c.to_digit(radix)
                .map(|d| acc * f64::from(radix) + f64::from(d))
        })
        .unwrap_or(f64::NAN)
}

/// Check raw input and produce the kind-specific numbers.
pub fn validate(input: &RawWorkoutInput) -> Result<(f64, f64, KindInput), ValidationError> {
    let third_field = match input.kind {
        WorkoutKind::Running => Field::Cadence,
        WorkoutKind::Cycling => Field::Elevation,
    };

    let fields = [
        (Field::Distance, coerce(&input.distance)),
        (Field::Duration, coerce(&input.duration)),
        (third_field, coerce(&input.third)),
    ];

    if let Some((field, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
        return Err(ValidationError::NonFinite { field: *field });
    }

    let must_be_positive = match input.kind {
        WorkoutKind::Running => &fields[..],
        WorkoutKind::Cycling => &fields[..2],
    };
    if let Some((field, _)) = must_be_positive.iter().find(|(_, v)| *v <= 0.0) {
        return Err(ValidationError::NonPositive { field: *field });
    }

    let [(_, distance), (_, duration), (_, third)] = fields;
    let kind_input = match input.kind {
        WorkoutKind::Running => KindInput::Running { cadence: third },
        WorkoutKind::Cycling => KindInput::Cycling {
            elevation_gain: third,
        },
    };

    Ok((distance, duration, kind_input))
}

/// Issues session-unique workout ids derived from the clock.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id for a workout created at `at`.
    ///
    /// Two workouts within the same millisecond get consecutive ids.
    pub fn next_id(&self, at: DateTime<FixedOffset>) -> WorkoutId {
        let now = (at.timestamp_millis().max(0) as u64) % ID_MODULUS;
        let mut current = self.last.load(Ordering::Relaxed);
        loop {
            let candidate = if now > current { now } else { current + 1 };
            match self.last.compare_exchange_weak(
                current,
                candidate,
                Ordering::Relaxed,
                Ordering::Relaxed,
            ) {
                Ok(_) => return WorkoutId::new(format!("{:010}", candidate)),
                Err(actual) => current = actual,
            }
        }
    }
}

/// Builds validated workouts.
///
/// Workouts are stamped in the user's UTC offset so descriptions carry
/// their local date.
#[derive(Debug)]
pub struct WorkoutFactory {
    ids: IdGenerator,
    offset: FixedOffset,
}

impl Default for WorkoutFactory {
    fn default() -> Self {
        Self::with_offset(Utc.fix())
    }
}

impl WorkoutFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self {
            ids: IdGenerator::new(),
            offset,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Validate `input` and build a workout at `coords`, stamped now.
    pub fn build(
        &self,
        input: &RawWorkoutInput,
        coords: Coords,
    ) -> Result<Workout, ValidationError> {
        self.build_at(input, coords, Utc::now().with_timezone(&self.offset))
    }

    /// Same as [`build`](Self::build) with an explicit creation time.
    pub fn build_at(
        &self,
        input: &RawWorkoutInput,
        coords: Coords,
        at: DateTime<FixedOffset>,
    ) -> Result<Workout, ValidationError> {
        let (distance, duration, kind_input) = validate(input)?;
        let id = self.ids.next_id(at);
        Ok(Workout::new(id, at, coords, distance, duration, kind_input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Metric;
    use chrono::{Datelike, TimeZone};

    fn input(kind: WorkoutKind, distance: &str, duration: &str, third: &str) -> RawWorkoutInput {
        RawWorkoutInput {
            kind,
            distance: distance.to_string(),
            duration: duration.to_string(),
            third: third.to_string(),
        }
    }

    #[test]
    fn test_coerce() {
        assert_eq!(coerce("5"), 5.0);
        assert_eq!(coerce(" 2.5 "), 2.5);
        assert_eq!(coerce(""), 0.0);
        assert_eq!(coerce("   "), 0.0);
        assert_eq!(coerce("-20"), -20.0);
        assert!(coerce("abc").is_nan());
        assert!(coerce("inf").is_infinite());
    }

    #[test]
    fn test_coerce_radix_literals() {
        assert_eq!(coerce("0x10"), 16.0);
        assert_eq!(coerce("0XfF"), 255.0);
        assert_eq!(coerce(" 0o17 "), 15.0);
        assert_eq!(coerce("0b101"), 5.0);
        assert!(coerce("0x").is_nan());
        assert!(coerce("0x1g").is_nan());
        assert!(coerce("0x+10").is_nan());
        assert!(coerce("-0x10").is_nan());
        assert!(coerce("0b102").is_nan());
    }

    #[test]
    fn test_hex_distance_is_accepted() {
        let (distance, _, _) = validate(&input(WorkoutKind::Cycling, "0xA", "30", "0")).unwrap();
        assert_eq!(distance, 10.0);
    }

    #[test]
    fn test_running_rejects_zero_cadence() {
        let result = validate(&input(WorkoutKind::Running, "5", "25", "0"));
        assert_eq!(
            result,
            Err(ValidationError::NonPositive {
                field: Field::Cadence
            })
        );
    }

    #[test]
    fn test_cycling_accepts_non_positive_elevation() {
        for elevation in ["-5", "0", "5"] {
            let result = validate(&input(WorkoutKind::Cycling, "10", "30", elevation));
            assert!(result.is_ok(), "elevation {} should be accepted", elevation);
        }
    }

    #[test]
    fn test_non_numeric_is_non_finite() {
        for kind in [WorkoutKind::Running, WorkoutKind::Cycling] {
            assert_eq!(
                validate(&input(kind, "abc", "25", "10")),
                Err(ValidationError::NonFinite {
                    field: Field::Distance
                })
            );
            assert_eq!(
                validate(&input(kind, "5", "xyz", "10")),
                Err(ValidationError::NonFinite {
                    field: Field::Duration
                })
            );
        }
    }

    #[test]
    fn test_finiteness_checked_before_positivity() {
        // Distance is non-positive, but the bad elevation is reported first.
        assert_eq!(
            validate(&input(WorkoutKind::Cycling, "0", "30", "high")),
            Err(ValidationError::NonFinite {
                field: Field::Elevation
            })
        );
    }

    #[test]
    fn test_blank_distance_is_non_positive() {
        assert_eq!(
            validate(&input(WorkoutKind::Cycling, "", "30", "10")),
            Err(ValidationError::NonPositive {
                field: Field::Distance
            })
        );
    }

    #[test]
    fn test_error_message_mentions_invalid_entry() {
        let err = validate(&input(WorkoutKind::Running, "5", "25", "-1")).unwrap_err();
        assert!(err.to_string().starts_with("Invalid Entry"));
        assert!(err.to_string().contains("cadence"));
    }

    #[test]
    fn test_build_running() {
        let factory = WorkoutFactory::new();
        let workout = factory
            .build(
                &input(WorkoutKind::Running, "5", "25", "180"),
                Coords::new(40.1, -73.1),
            )
            .expect("valid running input");

        assert_eq!(workout.metric(), Metric::Pace(5.0));
        assert_eq!(workout.coords(), Coords::new(40.1, -73.1));
        assert!(workout.description().starts_with("Running on "));
    }

    #[test]
    fn test_build_cycling_negative_elevation() {
        let factory = WorkoutFactory::new();
        let workout = factory
            .build(
                &input(WorkoutKind::Cycling, "10", "30", "-20"),
                Coords::new(40.1, -73.1),
            )
            .expect("negative elevation is allowed");

        assert_eq!(workout.metric(), Metric::Speed(20.0));
    }

    #[test]
    fn test_build_stamps_local_offset() {
        let pacific = FixedOffset::west_opt(7 * 3600).unwrap();
        let factory = WorkoutFactory::with_offset(pacific);

        let workout = factory
            .build(
                &input(WorkoutKind::Running, "5", "25", "180"),
                Coords::new(37.4, -122.1),
            )
            .unwrap();

        let created = workout.created_at();
        assert_eq!(*created.offset(), pacific);
        assert!(workout
            .description()
            .ends_with(&format!(" {}", created.day())));
    }

    #[test]
    fn test_build_at_evening_keeps_local_day() {
        let eastern = FixedOffset::west_opt(4 * 3600).unwrap();
        let factory = WorkoutFactory::with_offset(eastern);
        let evening = eastern.with_ymd_and_hms(2024, 4, 13, 21, 0, 0).unwrap();

        let workout = factory
            .build_at(
                &input(WorkoutKind::Running, "5", "25", "180"),
                Coords::new(40.1, -73.1),
                evening,
            )
            .unwrap();

        assert_eq!(workout.description(), "Running on April 13");
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let ids = IdGenerator::new();
        let at = Utc
            .with_ymd_and_hms(2024, 4, 14, 9, 30, 0)
            .unwrap()
            .fixed_offset();

        let a = ids.next_id(at);
        let b = ids.next_id(at);
        let c = ids.next_id(at);

        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_eq!(a.as_str().len(), 10);
    }

    #[test]
    fn test_ids_never_go_backwards() {
        let ids = IdGenerator::new();
        let later = Utc
            .with_ymd_and_hms(2024, 4, 14, 9, 30, 0)
            .unwrap()
            .fixed_offset();
        let earlier = Utc
            .with_ymd_and_hms(2024, 4, 14, 9, 0, 0)
            .unwrap()
            .fixed_offset();

        let a = ids.next_id(later);
        let b = ids.next_id(earlier);

        assert_ne!(a, b);
    }
}
