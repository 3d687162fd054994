// ABOUTME: Run lifecycle glue between the tracking engine, settings, and history
// ABOUTME: Starts runs with the preferred GPS profile and records finished runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use crate::errors::{AppResult, StoreOutcome};
use crate::history::RunHistoryStore;
use crate::models::{RunSession, TrackingSnapshot};
use crate::settings::SettingsStore;
use crate::tracking::{StartOutcome, TrackingEngine};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// A run that was stopped and handed to history
#[derive(Debug)]
pub struct FinishedRun {
    /// Final engine state
    pub snapshot: TrackingSnapshot,
    /// Record built from the snapshot and the units in effect at stop
    pub session: RunSession,
    /// History after the save, possibly unconfirmed
    pub history: StoreOutcome<Vec<RunSession>>,
}

/// Drives one engine against the shared stores
#[derive(Debug)]
pub struct RunController {
    engine: TrackingEngine,
    settings: Arc<SettingsStore>,
    history: Arc<RunHistoryStore>,
}

impl RunController {
    /// Wire an engine to the stores
    #[must_use]
    pub const fn new(
        engine: TrackingEngine,
        settings: Arc<SettingsStore>,
        history: Arc<RunHistoryStore>,
    ) -> Self {
        Self {
            engine,
            settings,
            history,
        }
    }

    /// Engine for snapshots and host event delivery
    #[must_use]
    pub const fn engine(&self) -> &TrackingEngine {
        &self.engine
    }

    /// Settings store
    #[must_use]
    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    /// History store
    #[must_use]
    pub fn history(&self) -> &RunHistoryStore {
        &self.history
    }

    /// Start tracking with the GPS profile from the current settings
    ///
    /// # Errors
    ///
    /// Returns an error when the location source cannot be subscribed
    pub async fn start_run(&self) -> AppResult<StartOutcome> {
        let settings = self.settings.current().await;
        self.engine.start(settings.gps_accuracy).await
    }

    /// Stop tracking and save the run. `None` when no run was active.
    pub async fn finish_run(&self) -> Option<FinishedRun> {
        let snapshot = self.engine.stop().await?;
        let settings = self.settings.current().await;
        let session =
            RunSession::from_snapshot(&snapshot, &settings, Utc::now().timestamp_millis());

        info!(
            run.id = %session.id,
            run.distance_meters = session.distance_meters,
            run.duration_seconds = session.duration_seconds,
            "Recording finished run"
        );
        let history = self.history.save_run(session.clone()).await;

        Some(FinishedRun {
            snapshot,
            session,
            history,
        })
    }
}
