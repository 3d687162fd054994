// ABOUTME: Threshold filter rejecting implausible distance deltas between GPS fixes
// ABOUTME: Discards jitter at rest and teleport artifacts from poor fixes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use crate::constants::tracking::{NOISE_GATE_MAX_METERS, NOISE_GATE_MIN_METERS};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Why a delta was not accumulated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// At or below the lower bound: drift while standing still
    Jitter,
    /// At or above the upper bound: signal loss or a warped fix
    Teleport,
    /// Not a finite number
    Invalid,
}

/// Accepts a delta only when `min_delta_meters < delta < max_delta_meters`.
///
/// Both bounds are exclusive: a delta of exactly 2.0 m is jitter and a delta
/// of exactly 100.0 m is a bad fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseGate {
    /// Deltas at or below this are discarded
    pub min_delta_meters: f64,
    /// Deltas at or above this are discarded
    pub max_delta_meters: f64,
}

impl Default for NoiseGate {
    fn default() -> Self {
        Self {
            min_delta_meters: NOISE_GATE_MIN_METERS,
            max_delta_meters: NOISE_GATE_MAX_METERS,
        }
    }
}

impl NoiseGate {
    /// Create a gate, validating the bounds
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when a bound is negative or not finite, or
    /// when `min >= max`
    pub fn new(min_delta_meters: f64, max_delta_meters: f64) -> AppResult<Self> {
        let gate = Self {
            min_delta_meters,
            max_delta_meters,
        };
        gate.validate()?;
        Ok(gate)
    }

    /// Check the bounds
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when a bound is negative or not finite, or
    /// when `min >= max`
    pub fn validate(&self) -> AppResult<()> {
        if !self.min_delta_meters.is_finite() || !self.max_delta_meters.is_finite() {
            return Err(AppError::config("noise gate bounds must be finite"));
        }
        if self.min_delta_meters < 0.0 {
            return Err(AppError::config("noise gate lower bound must not be negative"));
        }
        if self.min_delta_meters >= self.max_delta_meters {
            return Err(AppError::config(format!(
                "noise gate lower bound {} must be below upper bound {}",
                self.min_delta_meters, self.max_delta_meters
            )));
        }
        Ok(())
    }

    /// Classify a delta
    ///
    /// # Errors
    ///
    /// Returns the reason the delta was rejected
    pub fn check(&self, delta_meters: f64) -> Result<f64, GateRejection> {
        if !delta_meters.is_finite() {
            Err(GateRejection::Invalid)
        } else if delta_meters <= self.min_delta_meters {
            Err(GateRejection::Jitter)
        } else if delta_meters >= self.max_delta_meters {
            Err(GateRejection::Teleport)
        } else {
            Ok(delta_meters)
        }
    }

    /// True when the delta should be accumulated
    #[must_use]
    pub fn admits(&self, delta_meters: f64) -> bool {
        self.check(delta_meters).is_ok()
    }
}
