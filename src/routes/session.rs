// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session routes: the page reports events, the server answers with the
//! rendering commands they produced.

use crate::app::{LocationUnavailable, SessionEvent, SessionState};
use crate::error::{AppError, Result};
use crate::models::{Coords, WorkoutEntry, WorkoutId};
use crate::services::RawWorkoutInput;
use crate::ui::{BrowserPosition, UiCommand};
use crate::{AppState, Session};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", post(start_session))
        .route("/api/events", post(post_event))
        .route("/api/workouts", get(list_workouts))
}

/// Largest UTC offset in use anywhere, in minutes.
const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Body of `POST /api/session`.
#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    #[serde(flatten)]
    pub position: PositionRequest,
    /// Minutes east of UTC; the negation of JavaScript's
    /// `Date.getTimezoneOffset()`.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl StartSessionRequest {
    fn utc_offset(&self) -> Result<FixedOffset> {
        let minutes = self.utc_offset_minutes;
        Some(minutes)
            .filter(|m| m.abs() <= MAX_UTC_OFFSET_MINUTES)
            .and_then(|m| FixedOffset::east_opt(m * 60))
            .ok_or_else(|| {
                AppError::BadRequest(format!("UTC offset out of range: {} minutes", minutes))
            })
    }
}

/// Outcome of the page's geolocation request.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PositionRequest {
    Resolved { latitude: f64, longitude: f64 },
    Unavailable { error: String },
}

impl PositionRequest {
    fn into_result(self) -> Result<std::result::Result<Coords, LocationUnavailable>> {
        match self {
            PositionRequest::Resolved {
                latitude,
                longitude,
            } => {
                if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
                    return Err(AppError::BadRequest(format!(
                        "Position out of range: {}, {}",
                        latitude, longitude
                    )));
                }
                Ok(Ok(Coords::new(latitude, longitude)))
            }
            PositionRequest::Unavailable { error } => Ok(Err(LocationUnavailable(error))),
        }
    }
}

/// An event raised by the page.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRequest {
    MapClick { coords: Coords },
    Submit { fields: RawWorkoutInput },
    KindChange,
    EntryClick { id: String },
}

/// Session state after an event, plus the commands to apply.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub state: SessionState,
    pub commands: Vec<UiCommand>,
}

impl SessionResponse {
    fn from_session(session: &Session) -> Self {
        Self {
            state: session.app.state().clone(),
            commands: session.commands.drain(),
        }
    }
}

/// Start a fresh session from the page's resolved position.
///
/// Any previous session and its workouts are discarded.
async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartSessionRequest>,
) -> Result<Json<SessionResponse>> {
    let utc_offset = request.utc_offset()?;
    let position = BrowserPosition(request.position.into_result()?);

    let mut guard = state.session.lock().await;
    let mut session = Session::new(&state.config, utc_offset);
    session.app.bootstrap(&position).await;

    tracing::info!(
        state = ?session.app.state(),
        utc_offset = %utc_offset,
        "Session started"
    );

    let response = SessionResponse::from_session(&session);
    *guard = Some(session);
    Ok(Json(response))
}

/// Apply one page event to the session.
async fn post_event(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EventRequest>,
) -> Result<Json<SessionResponse>> {
    let mut guard = state.session.lock().await;
    let session = guard.as_mut().ok_or(AppError::NoSession)?;

    let event = match request {
        EventRequest::MapClick { coords } => SessionEvent::MapClick { coords },
        EventRequest::Submit { fields } => {
            session.app.form_mut().set_fields(fields);
            SessionEvent::Submit
        }
        EventRequest::KindChange => SessionEvent::KindChange,
        EventRequest::EntryClick { id } => SessionEvent::EntryClick {
            id: WorkoutId::new(id),
        },
    };

    tracing::debug!(event = ?event, "Session event");
    session.app.dispatch(event);

    Ok(Json(SessionResponse::from_session(session)))
}

/// Recorded workouts in creation order.
async fn list_workouts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<WorkoutEntry>>> {
    let guard = state.session.lock().await;
    let session = guard.as_ref().ok_or(AppError::NoSession)?;

    Ok(Json(
        session
            .app
            .store()
            .iter()
            .map(WorkoutEntry::from)
            .collect(),
    ))
}
