// ABOUTME: Immutable record of a completed run stored in history
// ABOUTME: Built once from the final tracking snapshot and the settings in effect
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use super::{TrackingSnapshot, UnitsSnapshot, UserSettings};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A completed run. Never mutated after creation; only deletable.
///
/// The units in effect at stop time are captured so later preference
/// changes do not alter how the run is displayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSession {
    /// Unique identifier
    pub id: String,
    /// Unix milliseconds at which tracking started
    pub started_at_unix_ms: i64,
    /// Elapsed whole seconds at stop
    pub duration_seconds: u64,
    /// Accepted distance at stop
    pub distance_meters: f64,
    /// Average speed at stop
    pub average_speed_mps: f64,
    /// Steps counted
    pub step_count: u64,
    /// Display units in effect at stop
    pub units_snapshot: UnitsSnapshot,
}

impl RunSession {
    /// Build the record for a run that just stopped.
    ///
    /// `fallback_started_at_ms` is used when the snapshot carries no start
    /// timestamp (a run that never reached the tracking phase).
    #[must_use]
    pub fn from_snapshot(
        snapshot: &TrackingSnapshot,
        settings: &UserSettings,
        fallback_started_at_ms: i64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at_unix_ms: snapshot.started_at_ms.unwrap_or(fallback_started_at_ms),
            duration_seconds: snapshot.elapsed_seconds,
            distance_meters: snapshot.distance_meters,
            average_speed_mps: snapshot.average_speed_mps,
            step_count: snapshot.step_count,
            units_snapshot: settings.units_snapshot(),
        }
    }

    /// Start time as a UTC timestamp
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.started_at_unix_ms).single()
    }
}
