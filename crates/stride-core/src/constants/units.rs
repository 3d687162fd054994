// ABOUTME: Unit conversion constants for distance, pace, and speed display
// ABOUTME: Metric and imperial factors plus the Earth radius for great-circle distance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

/// Meters in a kilometer
pub const METERS_PER_KM: f64 = 1000.0;

/// Meters in a statute mile
pub const METERS_PER_MILE: f64 = 1609.34;

/// Meters per second to kilometers per hour
pub const MPS_TO_KMH: f64 = 3.6;

/// Meters per second to miles per hour
pub const MPS_TO_MPH: f64 = 2.237;

/// Mean Earth radius in meters
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Converted distances below this value are shown with two decimals
pub const DISTANCE_TWO_DECIMALS_BELOW: f64 = 10.0;

/// Shown instead of a pace when the runner is not moving
pub const PACE_PLACEHOLDER: &str = "--:--";

/// Seconds in a minute
pub const SECONDS_PER_MINUTE: u64 = 60;

/// Seconds in an hour
pub const SECONDS_PER_HOUR: u64 = 3_600;
