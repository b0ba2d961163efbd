// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session workout store.

use crate::models::{Workout, WorkoutId};
use std::collections::HashMap;

/// Append-only list of workouts in creation order, indexed by id.
#[derive(Debug, Default, Clone)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
    index: HashMap<WorkoutId, usize>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a workout.
    pub fn add(&mut self, workout: Workout) -> &Workout {
        let position = self.workouts.len();
        self.index.insert(workout.id().clone(), position);
        self.workouts.push(workout);
        &self.workouts[position]
    }

    /// Look up a workout by id. `None` is not an error for callers.
    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.index.get(id).map(|&i| &self.workouts[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Workout> {
        self.workouts.iter()
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}
