// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - workout construction and storage.

pub mod factory;
pub mod store;

pub use factory::{Field, RawWorkoutInput, ValidationError, WorkoutFactory};
pub use store::WorkoutStore;
