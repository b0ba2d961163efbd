// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Mapty: log running and cycling workouts on a map.
//!
//! This crate provides the workout model, the session controller that
//! turns map clicks and form submissions into recorded workouts, and the
//! HTTP surface the browser page talks to.

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod ui;

use app::App;
use chrono::FixedOffset;
use config::Config;
use tokio::sync::Mutex;
use ui::{BrowserForm, CommandSink};

/// Controller wired to the browser adapters.
pub type BrowserApp = App<CommandSink, BrowserForm, CommandSink, CommandSink>;

/// The single logging session and the buffer its commands land in.
pub struct Session {
    pub app: BrowserApp,
    pub commands: CommandSink,
}

impl Session {
    /// Workouts are stamped in `utc_offset`, the page's local offset.
    pub fn new(config: &Config, utc_offset: FixedOffset) -> Self {
        let commands = CommandSink::new();
        let app = App::new(
            commands.clone(),
            BrowserForm::new(commands.clone()),
            commands.clone(),
            commands.clone(),
            config.map.clone(),
        )
        .with_utc_offset(utc_offset);
        Self { app, commands }
    }
}

/// Shared application state.
pub struct AppState {
    pub config: Config,
    /// Events are applied one at a time under this lock.
    pub session: Mutex<Option<Session>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session: Mutex::new(None),
        }
    }
}
