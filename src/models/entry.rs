// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! List-row view of a workout for the frontend.

use crate::models::workout::{Coords, Workout, WorkoutDetail, WorkoutKind};
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A fully derived workout, ready to render as a list row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutEntry {
    pub id: String,
    pub kind: WorkoutKind,
    pub icon: String,
    pub description: String,
    pub coords: Coords,
    pub distance: f64,
    pub duration: f64,
    /// Pace or speed, rounded to one decimal place
    pub metric: f64,
    pub metric_unit: String,
    /// Cadence (running) or elevation gain (cycling)
    pub extra: f64,
    pub extra_unit: String,
}

impl From<&Workout> for WorkoutEntry {
    fn from(workout: &Workout) -> Self {
        let metric = workout.metric();
        let (extra, extra_unit) = match *workout.detail() {
            WorkoutDetail::Running { cadence, .. } => (cadence, "spm"),
            WorkoutDetail::Cycling { elevation_gain, .. } => (elevation_gain, "m"),
        };

        Self {
            id: workout.id().to_string(),
            kind: workout.kind(),
            icon: workout.kind().icon().to_string(),
            description: workout.description().to_string(),
            coords: workout.coords(),
            distance: workout.distance(),
            duration: workout.duration(),
            metric: round_tenth(metric.value()),
            metric_unit: metric.unit().to_string(),
            extra,
            extra_unit: extra_unit.to_string(),
        }
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
