// ABOUTME: Platform sensor seams consumed by the tracking engine
// ABOUTME: Location permission, GPS fix stream, and step counter stream traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! # Sensor Abstractions
//!
//! The engine never talks to hardware directly. A host (mobile shell, replay
//! harness, test) supplies implementations of these traits; events arrive on
//! unbounded channels so a slow consumer never blocks the sensor callback.

/// In-process sensors driven programmatically for replays and tests
pub mod synthetic;

pub use synthetic::SyntheticSensors;

use crate::constants::tracking::{
    BALANCED_DISTANCE_METERS, BALANCED_INTERVAL_MS, HIGH_ACCURACY_DISTANCE_METERS,
    HIGH_ACCURACY_INTERVAL_MS,
};
use crate::errors::AppResult;
use crate::models::{GpsAccuracy, LocationFix, StepReporting, StepUpdate};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Stream of GPS fixes for one subscription
pub type FixReceiver = mpsc::UnboundedReceiver<LocationFix>;

/// Stream of step counter callbacks for one subscription
pub type StepReceiver = mpsc::UnboundedReceiver<StepUpdate>;

/// Location permission as reported by the operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// The user has not been asked yet
    #[default]
    Undetermined,
    /// Access allowed
    Granted,
    /// Access refused
    Denied,
}

/// Minimum time and distance between delivered fixes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingProfile {
    /// Minimum milliseconds between fixes
    pub min_interval_ms: u64,
    /// Minimum movement in meters between fixes
    pub min_distance_meters: f64,
}

impl SamplingProfile {
    /// Best available accuracy: one fix per second or per meter
    pub const HIGH: Self = Self {
        min_interval_ms: HIGH_ACCURACY_INTERVAL_MS,
        min_distance_meters: HIGH_ACCURACY_DISTANCE_METERS,
    };

    /// Battery-saving profile: one fix per five seconds or ten meters
    pub const BALANCED: Self = Self {
        min_interval_ms: BALANCED_INTERVAL_MS,
        min_distance_meters: BALANCED_DISTANCE_METERS,
    };

    /// Default profile for a user accuracy preference
    #[must_use]
    pub const fn for_accuracy(accuracy: GpsAccuracy) -> Self {
        match accuracy {
            GpsAccuracy::High => Self::HIGH,
            GpsAccuracy::Balanced => Self::BALANCED,
        }
    }
}

/// Foreground location permission
#[async_trait]
pub trait LocationPermissions: Send + Sync {
    /// Current status without prompting
    fn status(&self) -> PermissionStatus;

    /// Prompt the user and resolve with their answer
    async fn request(&self) -> PermissionStatus;
}

/// Source of GPS position fixes
pub trait LocationSource: Send + Sync {
    /// Begin delivering fixes at the given sampling profile.
    ///
    /// Dropping the receiver ends the subscription.
    ///
    /// # Errors
    ///
    /// Returns an error when the receiver cannot be started
    fn subscribe(&self, profile: SamplingProfile) -> AppResult<FixReceiver>;
}

/// Hardware step counter
pub trait StepSource: Send + Sync {
    /// True when the device has a usable step counter
    fn is_available(&self) -> bool;

    /// Convention this source reports counts in
    fn reporting(&self) -> StepReporting;

    /// Zero a cumulative counter so totals start at this run
    fn reset_counter(&self);

    /// Begin delivering step updates
    ///
    /// # Errors
    ///
    /// Returns `SENSOR_UNAVAILABLE` when the counter cannot be started
    fn subscribe(&self) -> AppResult<StepReceiver>;
}

/// The sensor set one engine is wired to
#[derive(Clone)]
pub struct SensorSources {
    /// Location permission gate
    pub permissions: Arc<dyn LocationPermissions>,
    /// GPS fixes
    pub location: Arc<dyn LocationSource>,
    /// Step counter
    pub steps: Arc<dyn StepSource>,
}

impl SensorSources {
    /// Wire every seam to the same synthetic device
    #[must_use]
    pub fn synthetic(sensors: &Arc<SyntheticSensors>) -> Self {
        Self {
            permissions: sensors.clone(),
            location: sensors.clone(),
            steps: sensors.clone(),
        }
    }
}

impl std::fmt::Debug for SensorSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SensorSources").finish_non_exhaustive()
    }
}
