// ABOUTME: Raw GPS position fix and coordinate types
// ABOUTME: Transient input consumed once by the tracking engine
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use serde::{Deserialize, Serialize};

/// A point on the Earth's surface in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from degrees
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A single GPS sample as delivered by the location source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Reported horizontal accuracy radius
    #[serde(default)]
    pub horizontal_accuracy_meters: f64,
    /// Instantaneous speed reported by the receiver, when it has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_mps: Option<f64>,
    /// Fix time in Unix milliseconds
    pub timestamp_ms: i64,
}

impl LocationFix {
    /// Fix without accuracy or speed information
    #[must_use]
    pub const fn at(latitude: f64, longitude: f64, timestamp_ms: i64) -> Self {
        Self {
            latitude,
            longitude,
            horizontal_accuracy_meters: 0.0,
            speed_mps: None,
            timestamp_ms,
        }
    }

    /// Attach a reported instantaneous speed
    #[must_use]
    pub fn with_speed(mut self, speed_mps: f64) -> Self {
        self.speed_mps = Some(speed_mps);
        self
    }

    /// Attach a reported accuracy radius
    #[must_use]
    pub fn with_accuracy(mut self, meters: f64) -> Self {
        self.horizontal_accuracy_meters = meters;
        self
    }

    /// Position of this fix
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Reported speed when present and non-negative
    #[must_use]
    pub fn usable_speed(&self) -> Option<f64> {
        self.speed_mps.filter(|speed| *speed >= 0.0)
    }
}
