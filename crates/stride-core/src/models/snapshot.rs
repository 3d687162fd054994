// ABOUTME: Live tracking snapshot exposed to the presentation layer
// ABOUTME: Immutable copy of the engine's accumulators at one instant
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use serde::{Deserialize, Serialize};

/// Engine lifecycle phase. There is no pause state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackingPhase {
    /// Not tracking; the last run's snapshot stays readable
    #[default]
    Idle,
    /// Consuming position and step events
    Tracking,
}

/// Read-only view of an in-progress (or just finished) run.
///
/// `distance_meters` never decreases while tracking and resets to zero
/// exactly at tracking start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackingSnapshot {
    /// True between `start()` and `stop()`
    pub is_tracking: bool,
    /// Accepted distance
    pub distance_meters: f64,
    /// Last usable instantaneous speed reported with an accepted fix
    pub current_speed_mps: f64,
    /// Distance over elapsed time since start
    pub average_speed_mps: f64,
    /// Whole seconds since start, derived from the wall clock
    pub elapsed_seconds: u64,
    /// Steps counted since start
    pub step_count: u64,
    /// Location permission granted
    pub has_permission: bool,
    /// Location permission refused; the UI shows a notice and allows retry
    pub permission_denied: bool,
    /// False when the device has no step counter; `step_count` stays at zero
    pub step_sensor_available: bool,
    /// Unix milliseconds at which the current (or last) run started
    pub started_at_ms: Option<i64>,
}

impl Default for TrackingSnapshot {
    fn default() -> Self {
        Self {
            is_tracking: false,
            distance_meters: 0.0,
            current_speed_mps: 0.0,
            average_speed_mps: 0.0,
            elapsed_seconds: 0,
            step_count: 0,
            has_permission: false,
            permission_denied: false,
            step_sensor_available: true,
            started_at_ms: None,
        }
    }
}

impl TrackingSnapshot {
    /// Lifecycle phase this snapshot was taken in
    #[must_use]
    pub const fn phase(&self) -> TrackingPhase {
        if self.is_tracking {
            TrackingPhase::Tracking
        } else {
            TrackingPhase::Idle
        }
    }
}
