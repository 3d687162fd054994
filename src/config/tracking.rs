// ABOUTME: Tracking engine configuration loaded from the environment
// ABOUTME: Noise gate bounds, elapsed-time ticker interval, and GPS sampling profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use super::env_parse_or;
use crate::constants::env_config;
use crate::constants::tracking::{
    NOISE_GATE_MAX_METERS, NOISE_GATE_MIN_METERS, TICK_INTERVAL_MS,
};
use crate::errors::{AppError, AppResult};
use crate::models::GpsAccuracy;
use crate::sensors::SamplingProfile;
use crate::tracking::NoiseGate;
use serde::{Deserialize, Serialize};

/// Tunables for the live tracking engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    /// Accepted range for a single position delta
    pub noise_gate: NoiseGate,
    /// Period of the elapsed-time ticker
    pub tick_interval_ms: u64,
    /// Sampling profile for `GpsAccuracy::High`
    pub high_profile: SamplingProfile,
    /// Sampling profile for `GpsAccuracy::Balanced`
    pub balanced_profile: SamplingProfile,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            noise_gate: NoiseGate::default(),
            tick_interval_ms: TICK_INTERVAL_MS,
            high_profile: SamplingProfile::HIGH,
            balanced_profile: SamplingProfile::BALANCED,
        }
    }
}

impl TrackingConfig {
    /// Load from `STRIDE_NOISE_GATE_MIN_METERS`, `STRIDE_NOISE_GATE_MAX_METERS`
    /// and `STRIDE_TICK_INTERVAL_MS`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            noise_gate: NoiseGate {
                min_delta_meters: env_parse_or(
                    env_config::NOISE_GATE_MIN_METERS,
                    NOISE_GATE_MIN_METERS,
                ),
                max_delta_meters: env_parse_or(
                    env_config::NOISE_GATE_MAX_METERS,
                    NOISE_GATE_MAX_METERS,
                ),
            },
            tick_interval_ms: env_parse_or(env_config::TICK_INTERVAL_MS, TICK_INTERVAL_MS),
            ..Self::default()
        }
    }

    /// Sampling profile to subscribe with for a user accuracy preference
    #[must_use]
    pub const fn profile_for(&self, accuracy: GpsAccuracy) -> SamplingProfile {
        match accuracy {
            GpsAccuracy::High => self.high_profile,
            GpsAccuracy::Balanced => self.balanced_profile,
        }
    }

    /// Check the gate bounds and the ticker interval
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` for an unusable gate or a zero tick interval
    pub fn validate(&self) -> AppResult<()> {
        self.noise_gate.validate()?;
        if self.tick_interval_ms == 0 {
            return Err(AppError::config("tick interval must be at least 1 ms"));
        }
        Ok(())
    }
}
