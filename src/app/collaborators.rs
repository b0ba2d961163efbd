// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Capabilities the controller drives but does not implement.

use crate::models::{Coords, Workout, WorkoutKind};
use crate::services::RawWorkoutInput;
use async_trait::async_trait;
use serde::Serialize;

/// The user's position could not be determined.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Location unavailable: {0}")]
pub struct LocationUnavailable(pub String);

/// One-shot position lookup.
#[async_trait]
pub trait Geolocation: Send + Sync {
    async fn request_position(&self) -> Result<Coords, LocationUnavailable>;
}

/// Map view settings applied when the map is created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapSettings {
    pub default_zoom: u8,
    /// Tile URL template, e.g. `https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png`
    pub tile_url: String,
    pub attribution: String,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            default_zoom: 13,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
        }
    }
}

pub trait MapView {
    fn initialize(&mut self, center: Coords, settings: &MapSettings);
    fn add_marker(&mut self, coords: Coords, label: &str, kind: WorkoutKind);
    fn pan_to(&mut self, coords: Coords, zoom: u8);
}

pub trait WorkoutForm {
    /// Current field values and selected kind.
    fn read_fields(&self) -> RawWorkoutInput;
    /// Make the form visible with the distance field focused.
    fn show(&mut self);
    fn hide(&mut self);
    fn clear(&mut self);
    /// Swap the cadence and elevation field groups.
    fn toggle_elevation_field(&mut self);
}

pub trait WorkoutList {
    fn append_entry(&mut self, workout: &Workout);
}

pub trait Alert {
    fn notify(&mut self, message: &str);
}
