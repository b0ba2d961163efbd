// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout model: a typed exercise session pinned to a map coordinate.
//!
//! Derived values (pace or speed, and the description) are computed once in
//! the constructor. A workout is never mutated after that.

use chrono::{DateTime, Datelike, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Month names indexed by zero-based month of year.
pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

impl Coords {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for Coords {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

/// Workout discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    /// Kind name with a leading capital, as used in descriptions.
    pub fn capitalized(self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    /// Emoji shown in popups and list rows.
    pub fn icon(self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkoutKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(UnknownKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Unknown workout kind: {0}")]
pub struct UnknownKind(pub String);

/// Opaque workout identifier, unique within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkoutId(String);

impl WorkoutId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind-specific input accepted by [`Workout::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindInput {
    Running { cadence: f64 },
    Cycling { elevation_gain: f64 },
}

impl KindInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            KindInput::Running { .. } => WorkoutKind::Running,
            KindInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// Kind-specific fields, including the derived metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorkoutDetail {
    /// Cadence in steps/min, pace in min/km.
    Running { cadence: f64, pace: f64 },
    /// Elevation gain in meters, speed in km/h.
    Cycling { elevation_gain: f64, speed: f64 },
}

/// The derived performance metric of a workout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Metric {
    Pace(f64),
    Speed(f64),
}

impl Metric {
    pub fn value(self) -> f64 {
        match self {
            Metric::Pace(v) | Metric::Speed(v) => v,
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Metric::Pace(_) => "min/km",
            Metric::Speed(_) => "km/h",
        }
    }
}

/// A recorded workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    id: WorkoutId,
    /// Creation time in the user's local offset
    created_at: DateTime<FixedOffset>,
    coords: Coords,
    /// Kilometers
    distance: f64,
    /// Minutes
    duration: f64,
    description: String,
    detail: WorkoutDetail,
}

impl Workout {
    /// Build a workout and compute its derived fields.
    ///
    /// Inputs are assumed validated. Non-finite numbers are not rejected
    /// here; they simply flow into the derived metric.
    pub fn new(
        id: WorkoutId,
        created_at: DateTime<FixedOffset>,
        coords: Coords,
        distance: f64,
        duration: f64,
        input: KindInput,
    ) -> Self {
        let detail = match input {
            KindInput::Running { cadence } => WorkoutDetail::Running {
                cadence,
                pace: duration / distance,
            },
            KindInput::Cycling { elevation_gain } => WorkoutDetail::Cycling {
                elevation_gain,
                speed: distance / (duration / 60.0),
            },
        };

        Self {
            description: describe(input.kind(), created_at),
            id,
            created_at,
            coords,
            distance,
            duration,
            detail,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn coords(&self) -> Coords {
        self.coords
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn detail(&self) -> &WorkoutDetail {
        &self.detail
    }

    pub fn kind(&self) -> WorkoutKind {
        match self.detail {
            WorkoutDetail::Running { .. } => WorkoutKind::Running,
            WorkoutDetail::Cycling { .. } => WorkoutKind::Cycling,
        }
    }

    pub fn metric(&self) -> Metric {
        match self.detail {
            WorkoutDetail::Running { pace, .. } => Metric::Pace(pace),
            WorkoutDetail::Cycling { speed, .. } => Metric::Speed(speed),
        }
    }

    /// Popup text for the map marker, e.g. `🏃‍♂️ Running on April 14`.
    pub fn marker_label(&self) -> String {
        format!("{} {}", self.kind().icon(), self.description)
    }
}

/// Description in the form `"<Kind> on <Month> <day>"`.
///
/// Month and day are read in the offset carried by `at`, so the user sees
/// their own calendar date.
pub fn describe(kind: WorkoutKind, at: DateTime<FixedOffset>) -> String {
    format!(
        "{} on {} {}",
        kind.capitalized(),
        MONTHS[at.month0() as usize],
        at.day()
    )
}
