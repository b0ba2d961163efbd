// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use mapty::app::{
    Alert, App, Geolocation, LocationUnavailable, MapSettings, MapView, WorkoutForm, WorkoutList,
};
use mapty::config::Config;
use mapty::models::{Coords, Workout, WorkoutId, WorkoutKind};
use mapty::routes::create_router;
use mapty::services::RawWorkoutInput;
use mapty::AppState;
use std::sync::Arc;

/// Geolocation that answers with a fixed result.
#[allow(dead_code)]
pub struct FixedGeolocation(pub Result<Coords, LocationUnavailable>);

#[async_trait]
impl Geolocation for FixedGeolocation {
    async fn request_position(&self) -> Result<Coords, LocationUnavailable> {
        self.0.clone()
    }
}

#[derive(Debug, Default)]
pub struct RecordingMap {
    pub initialized: Option<(Coords, u8)>,
    pub markers: Vec<(Coords, String, WorkoutKind)>,
    pub pans: Vec<(Coords, u8)>,
}

impl MapView for RecordingMap {
    fn initialize(&mut self, center: Coords, settings: &MapSettings) {
        self.initialized = Some((center, settings.default_zoom));
    }

    fn add_marker(&mut self, coords: Coords, label: &str, kind: WorkoutKind) {
        self.markers.push((coords, label.to_string(), kind));
    }

    fn pan_to(&mut self, coords: Coords, zoom: u8) {
        self.pans.push((coords, zoom));
    }
}

#[derive(Debug)]
pub struct FakeForm {
    pub fields: RawWorkoutInput,
    pub visible: bool,
    pub show_count: usize,
    pub clear_count: usize,
    pub elevation_visible: bool,
}

impl Default for FakeForm {
    fn default() -> Self {
        Self {
            fields: RawWorkoutInput {
                kind: WorkoutKind::Running,
                distance: String::new(),
                duration: String::new(),
                third: String::new(),
            },
            visible: false,
            show_count: 0,
            clear_count: 0,
            elevation_visible: false,
        }
    }
}

#[allow(dead_code)]
impl FakeForm {
    pub fn fill(&mut self, kind: WorkoutKind, distance: &str, duration: &str, third: &str) {
        self.fields = RawWorkoutInput {
            kind,
            distance: distance.to_string(),
            duration: duration.to_string(),
            third: third.to_string(),
        };
    }
}

impl WorkoutForm for FakeForm {
    fn read_fields(&self) -> RawWorkoutInput {
        self.fields.clone()
    }

    fn show(&mut self) {
        self.visible = true;
        self.show_count += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn clear(&mut self) {
        self.clear_count += 1;
        self.fields.distance.clear();
        self.fields.duration.clear();
        self.fields.third.clear();
    }

    fn toggle_elevation_field(&mut self) {
        self.elevation_visible = !self.elevation_visible;
    }
}

#[derive(Debug, Default)]
pub struct RecordingList {
    pub entries: Vec<WorkoutId>,
}

impl WorkoutList for RecordingList {
    fn append_entry(&mut self, workout: &Workout) {
        self.entries.push(workout.id().clone());
    }
}

#[derive(Debug, Default)]
pub struct RecordingAlert {
    pub messages: Vec<String>,
}

impl Alert for RecordingAlert {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

pub type TestApp = App<RecordingMap, FakeForm, RecordingList, RecordingAlert>;

/// Create a controller wired to recording fakes.
#[allow(dead_code)]
pub fn test_controller() -> TestApp {
    App::new(
        RecordingMap::default(),
        FakeForm::default(),
        RecordingList::default(),
        RecordingAlert::default(),
        MapSettings::default(),
    )
}

/// Create a controller whose map is already open at (40.0, -73.0).
#[allow(dead_code)]
pub async fn ready_controller() -> TestApp {
    let mut app = test_controller();
    app.bootstrap(&FixedGeolocation(Ok(Coords::new(40.0, -73.0))))
        .await;
    app
}

/// Create a test router with a fresh state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState::new(Config::test_default()));
    (create_router(state.clone()), state)
}
