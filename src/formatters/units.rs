// ABOUTME: Unit conversion and display formatting for distance, pace, speed, time, and steps
// ABOUTME: Pure functions with fixed rounding rules for oversized armband text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use crate::constants::units::{
    DISTANCE_TWO_DECIMALS_BELOW, METERS_PER_KM, METERS_PER_MILE, MPS_TO_KMH, MPS_TO_MPH,
    PACE_PLACEHOLDER, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use crate::models::{DistanceUnit, PaceUnit, SpeedUnit};

/// Meters in one display unit of distance
#[must_use]
pub const fn meters_per_distance_unit(unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Km => METERS_PER_KM,
        DistanceUnit::Miles => METERS_PER_MILE,
    }
}

/// Meters in the distance unit a pace is expressed over
#[must_use]
pub const fn meters_per_pace_unit(unit: PaceUnit) -> f64 {
    match unit {
        PaceUnit::MinPerKm => METERS_PER_KM,
        PaceUnit::MinPerMile => METERS_PER_MILE,
    }
}

/// Convert meters into the display unit
#[must_use]
pub fn convert_distance(meters: f64, unit: DistanceUnit) -> f64 {
    meters / meters_per_distance_unit(unit)
}

/// Convert meters per second into the display unit
#[must_use]
pub fn convert_speed(speed_mps: f64, unit: SpeedUnit) -> f64 {
    match unit {
        SpeedUnit::Kmh => speed_mps * MPS_TO_KMH,
        SpeedUnit::Mph => speed_mps * MPS_TO_MPH,
    }
}

/// Distance in the chosen unit: two decimals below 10, one decimal otherwise.
///
/// `9999 m` is `9.999 km`, which renders as `"10.00"`; `10000 m` renders as `"10.0"`.
#[must_use]
pub fn format_distance(meters: f64, unit: DistanceUnit) -> String {
    let value = convert_distance(meters, unit);
    if value < DISTANCE_TWO_DECIMALS_BELOW {
        format!("{value:.2}")
    } else {
        format!("{value:.1}")
    }
}

/// Pace as `M:SS` per unit distance, or `--:--` when the speed is exactly zero
#[must_use]
#[allow(clippy::float_cmp)] // only an exact zero renders the placeholder
pub fn format_pace(speed_mps: f64, unit: PaceUnit) -> String {
    if speed_mps == 0.0 {
        return PACE_PLACEHOLDER.to_owned();
    }

    let seconds_per_unit = meters_per_pace_unit(unit) / speed_mps;
    let minutes = (seconds_per_unit / 60.0).floor() as u64;
    let seconds = (seconds_per_unit % 60.0).floor() as u64;

    format!("{minutes}:{seconds:02}")
}

/// Speed in the chosen unit with one decimal
#[must_use]
pub fn format_speed(speed_mps: f64, unit: SpeedUnit) -> String {
    format!("{:.1}", convert_speed(speed_mps, unit))
}

/// Elapsed time as `M:SS` under an hour, `H:MM:SS` otherwise
#[must_use]
pub fn format_time(total_seconds: u64) -> String {
    let hours = total_seconds / SECONDS_PER_HOUR;
    let minutes = (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = total_seconds % SECONDS_PER_MINUTE;

    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Step count with comma thousands grouping (`12,345`)
#[must_use]
pub fn format_steps(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
