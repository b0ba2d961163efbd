// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Browser adapters.
//!
//! The browser renders the map, form and list. The controller's calls into
//! those collaborators are recorded as [`UiCommand`]s and returned to the
//! page in the response to each event.

use crate::app::{
    Alert, Geolocation, LocationUnavailable, MapSettings, MapView, WorkoutForm, WorkoutList,
};
use crate::models::{Coords, Workout, WorkoutEntry, WorkoutKind};
use crate::services::RawWorkoutInput;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};

/// Leaflet popup options for a workout marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupOptions {
    pub max_width: u32,
    pub min_width: u32,
    pub auto_close: bool,
    pub close_on_click: bool,
    pub class_name: String,
}

impl PopupOptions {
    pub fn for_kind(kind: WorkoutKind) -> Self {
        Self {
            max_width: 300,
            min_width: 100,
            auto_close: false,
            close_on_click: false,
            class_name: format!("{}-popup", kind),
        }
    }
}

/// A rendering instruction for the page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum UiCommand {
    InitializeMap {
        center: Coords,
        zoom: u8,
        tile_url: String,
        attribution: String,
    },
    AddMarker {
        coords: Coords,
        label: String,
        kind: WorkoutKind,
        popup: PopupOptions,
    },
    PanTo {
        coords: Coords,
        zoom: u8,
    },
    ShowForm {
        focus: String,
    },
    HideForm,
    ClearForm,
    ToggleElevationField,
    AppendEntry {
        entry: WorkoutEntry,
    },
    Alert {
        message: String,
    },
}

/// Shared command buffer; clones append to the same queue.
#[derive(Debug, Clone, Default)]
pub struct CommandSink {
    commands: Arc<Mutex<Vec<UiCommand>>>,
}

impl CommandSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<UiCommand>> {
        // A poisoned buffer still holds valid commands.
        self.commands
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, command: UiCommand) {
        self.lock().push(command);
    }

    /// Take every queued command.
    pub fn drain(&self) -> Vec<UiCommand> {
        std::mem::take(&mut *self.lock())
    }
}

impl MapView for CommandSink {
    fn initialize(&mut self, center: Coords, settings: &MapSettings) {
        self.push(UiCommand::InitializeMap {
            center,
            zoom: settings.default_zoom,
            tile_url: settings.tile_url.clone(),
            attribution: settings.attribution.clone(),
        });
    }

    fn add_marker(&mut self, coords: Coords, label: &str, kind: WorkoutKind) {
        self.push(UiCommand::AddMarker {
            coords,
            label: label.to_string(),
            kind,
            popup: PopupOptions::for_kind(kind),
        });
    }

    fn pan_to(&mut self, coords: Coords, zoom: u8) {
        self.push(UiCommand::PanTo { coords, zoom });
    }
}

impl WorkoutList for CommandSink {
    fn append_entry(&mut self, workout: &Workout) {
        self.push(UiCommand::AppendEntry {
            entry: WorkoutEntry::from(workout),
        });
    }
}

impl Alert for CommandSink {
    fn notify(&mut self, message: &str) {
        self.push(UiCommand::Alert {
            message: message.to_string(),
        });
    }
}

/// Form adapter holding the values last submitted by the page.
#[derive(Debug, Clone)]
pub struct BrowserForm {
    fields: RawWorkoutInput,
    sink: CommandSink,
}

impl BrowserForm {
    pub fn new(sink: CommandSink) -> Self {
        Self {
            fields: blank_fields(WorkoutKind::Running),
            sink,
        }
    }

    /// Record the field values sent with a submit event.
    pub fn set_fields(&mut self, fields: RawWorkoutInput) {
        self.fields = fields;
    }
}

fn blank_fields(kind: WorkoutKind) -> RawWorkoutInput {
    RawWorkoutInput {
        kind,
        distance: String::new(),
        duration: String::new(),
        third: String::new(),
    }
}

impl WorkoutForm for BrowserForm {
    fn read_fields(&self) -> RawWorkoutInput {
        self.fields.clone()
    }

    fn show(&mut self) {
        self.sink.push(UiCommand::ShowForm {
            focus: "distance".to_string(),
        });
    }

    fn hide(&mut self) {
        self.sink.push(UiCommand::HideForm);
    }

    fn clear(&mut self) {
        // The kind selector keeps its value.
        self.fields = blank_fields(self.fields.kind);
        self.sink.push(UiCommand::ClearForm);
    }

    fn toggle_elevation_field(&mut self) {
        self.sink.push(UiCommand::ToggleElevationField);
    }
}

/// A position the page already resolved through the browser API.
#[derive(Debug, Clone)]
pub struct BrowserPosition(pub Result<Coords, LocationUnavailable>);

#[async_trait]
impl Geolocation for BrowserPosition {
    async fn request_position(&self) -> Result<Coords, LocationUnavailable> {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let sink = CommandSink::new();
        let mut alert = sink.clone();
        let mut map = sink.clone();

        alert.notify("hello");
        map.pan_to(Coords::new(1.0, 2.0), 13);

        let commands = sink.drain();
        assert_eq!(commands.len(), 2);
        assert!(sink.drain().is_empty());
    }

    #[test]
    fn test_marker_popup_options() {
        let mut sink = CommandSink::new();
        sink.add_marker(Coords::new(1.0, 2.0), "🚴‍♀️ Cycling on May 1", WorkoutKind::Cycling);

        match &sink.drain()[..] {
            [UiCommand::AddMarker { popup, .. }] => {
                assert_eq!(popup.class_name, "cycling-popup");
                assert_eq!(popup.max_width, 300);
                assert_eq!(popup.min_width, 100);
                assert!(!popup.auto_close);
                assert!(!popup.close_on_click);
            }
            other => panic!("unexpected commands: {:?}", other),
        }
    }

    #[test]
    fn test_command_serialization() {
        let json = serde_json::to_value(UiCommand::PanTo {
            coords: Coords::new(40.0, -73.0),
            zoom: 13,
        })
        .unwrap();

        assert_eq!(json["command"], "pan_to");
        assert_eq!(json["coords"]["lat"], 40.0);
        assert_eq!(json["zoom"], 13);
    }

    #[test]
    fn test_clear_keeps_kind() {
        let mut form = BrowserForm::new(CommandSink::new());
        form.set_fields(RawWorkoutInput {
            kind: WorkoutKind::Cycling,
            distance: "10".to_string(),
            duration: "30".to_string(),
            third: "5".to_string(),
        });

        form.clear();

        let fields = form.read_fields();
        assert_eq!(fields.kind, WorkoutKind::Cycling);
        assert!(fields.distance.is_empty());
    }
}
