// ABOUTME: Tracking constants for GPS noise filtering and sampling profiles
// ABOUTME: Defaults for the distance noise gate, ticker cadence, and location subscriptions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

/// Deltas at or below this many meters are treated as jitter at rest
pub const NOISE_GATE_MIN_METERS: f64 = 2.0;

/// Deltas at or above this many meters are treated as a bad fix
pub const NOISE_GATE_MAX_METERS: f64 = 100.0;

/// Elapsed-time ticker cadence
pub const TICK_INTERVAL_MS: u64 = 1_000;

/// Floor for the average speed denominator in seconds
pub const MIN_AVERAGE_SPEED_SECONDS: i64 = 1;

/// High accuracy profile: minimum interval between fixes
pub const HIGH_ACCURACY_INTERVAL_MS: u64 = 1_000;

/// High accuracy profile: minimum movement between fixes
pub const HIGH_ACCURACY_DISTANCE_METERS: f64 = 1.0;

/// Balanced profile: minimum interval between fixes
pub const BALANCED_INTERVAL_MS: u64 = 5_000;

/// Balanced profile: minimum movement between fixes
pub const BALANCED_DISTANCE_METERS: f64 = 10.0;
