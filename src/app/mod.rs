// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session controller.
//!
//! Drives one workout-logging session:
//! 1. Resolve the user's position and open the map there
//! 2. Map click opens the form at the clicked point
//! 3. Form submit validates, records the workout, draws a row and a marker
//! 4. List click pans the map to that workout
//!
//! Events are handled one at a time; the controller owns all session state.

pub mod collaborators;

pub use collaborators::{
    Alert, Geolocation, LocationUnavailable, MapSettings, MapView, WorkoutForm, WorkoutList,
};

use crate::models::{Coords, WorkoutId};
use crate::services::{ValidationError, WorkoutFactory, WorkoutStore};
use chrono::FixedOffset;
use serde::Serialize;

/// Alert text when the position cannot be determined.
pub const LOCATION_NEEDED: &str = "Need access to location";

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// Waiting for the position lookup.
    Bootstrapping,
    /// Position lookup failed; no map for this session.
    LocationUnavailable,
    AwaitingMapClick,
    /// Form is shown for the clicked point.
    FormOpen { pending: Coords },
}

/// Input events delivered by the collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    MapClick { coords: Coords },
    Submit,
    KindChange,
    EntryClick { id: WorkoutId },
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Recorded(WorkoutId),
    Rejected(ValidationError),
    /// No form was open.
    Ignored,
}

/// The workout-logging controller.
pub struct App<M, F, L, A> {
    map: M,
    form: F,
    list: L,
    alert: A,
    settings: MapSettings,
    factory: WorkoutFactory,
    store: WorkoutStore,
    state: SessionState,
}

impl<M, F, L, A> App<M, F, L, A>
where
    M: MapView,
    F: WorkoutForm,
    L: WorkoutList,
    A: Alert,
{
    pub fn new(map: M, form: F, list: L, alert: A, settings: MapSettings) -> Self {
        Self {
            map,
            form,
            list,
            alert,
            settings,
            factory: WorkoutFactory::new(),
            store: WorkoutStore::new(),
            state: SessionState::Bootstrapping,
        }
    }

    /// Stamp workouts in the user's UTC offset instead of UTC.
    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.factory = WorkoutFactory::with_offset(offset);
        self
    }

    pub fn utc_offset(&self) -> FixedOffset {
        self.factory.offset()
    }

    /// Ask for the user's position and set up the map from the answer.
    pub async fn bootstrap<G>(&mut self, geolocation: &G) -> &SessionState
    where
        G: Geolocation + ?Sized,
    {
        let position = geolocation.request_position().await;
        self.handle_position(position);
        &self.state
    }

    /// Apply a resolved (or failed) position lookup.
    pub fn handle_position(&mut self, position: Result<Coords, LocationUnavailable>) {
        if self.state != SessionState::Bootstrapping {
            tracing::debug!(state = ?self.state, "Ignoring position after bootstrap");
            return;
        }

        match position {
            Ok(center) => {
                tracing::info!(lat = center.lat, lng = center.lng, "Position resolved");
                self.map.initialize(center, &self.settings);
                self.state = SessionState::AwaitingMapClick;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Position unavailable");
                self.alert.notify(LOCATION_NEEDED);
                self.state = SessionState::LocationUnavailable;
            }
        }
    }

    /// Route an event to its handler.
    pub fn dispatch(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::MapClick { coords } => self.handle_map_click(coords),
            SessionEvent::Submit => {
                self.handle_submit();
            }
            SessionEvent::KindChange => self.handle_kind_change(),
            SessionEvent::EntryClick { id } => {
                self.handle_entry_click(&id);
            }
        }
    }

    /// Open the form for the clicked point.
    ///
    /// A click while the form is already open moves the pending location.
    pub fn handle_map_click(&mut self, coords: Coords) {
        match self.state {
            SessionState::AwaitingMapClick | SessionState::FormOpen { .. } => {
                tracing::debug!(lat = coords.lat, lng = coords.lng, "Map clicked");
                self.state = SessionState::FormOpen { pending: coords };
                self.form.show();
            }
            SessionState::Bootstrapping | SessionState::LocationUnavailable => {
                tracing::debug!(state = ?self.state, "Ignoring map click without a map");
            }
        }
    }

    /// Validate the form and record the workout.
    pub fn handle_submit(&mut self) -> SubmitOutcome {
        let SessionState::FormOpen { pending } = self.state else {
            tracing::debug!(state = ?self.state, "Ignoring submit with no open form");
            return SubmitOutcome::Ignored;
        };

        let fields = self.form.read_fields();
        let workout = match self.factory.build(&fields, pending) {
            Ok(workout) => workout,
            Err(e) => {
                tracing::info!(error = %e, kind = %fields.kind, "Rejected workout entry");
                self.alert.notify(&e.to_string());
                return SubmitOutcome::Rejected(e);
            }
        };

        let workout = self.store.add(workout);
        tracing::info!(
            id = %workout.id(),
            kind = %workout.kind(),
            distance = workout.distance(),
            duration = workout.duration(),
            "Workout recorded"
        );

        self.form.clear();
        self.form.hide();
        self.list.append_entry(workout);
        self.map
            .add_marker(workout.coords(), &workout.marker_label(), workout.kind());
        let id = workout.id().clone();

        self.state = SessionState::AwaitingMapClick;
        SubmitOutcome::Recorded(id)
    }

    pub fn handle_kind_change(&mut self) {
        self.form.toggle_elevation_field();
    }

    /// Pan to the workout behind a clicked list row.
    ///
    /// Returns `false` for an id that is not in the store.
    pub fn handle_entry_click(&mut self, id: &WorkoutId) -> bool {
        match self.store.find_by_id(id) {
            Some(workout) => {
                self.map
                    .pan_to(workout.coords(), self.settings.default_zoom);
                true
            }
            None => {
                tracing::debug!(id = %id, "No workout for clicked entry");
                false
            }
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut F {
        &mut self.form
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn alert(&self) -> &A {
        &self.alert
    }
}
