// ABOUTME: Stat-kind dispatch for the big-number display
// ABOUTME: Closed enumeration of displayable stats with exhaustive unit-aware formatting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! # Stat Formatting
//!
//! The display shows one stat at a time in oversized text. [`StatKind`] is
//! the closed set of stats; [`format_stat`] matches it exhaustively so a new
//! stat kind cannot be added without deciding how it renders.

/// Unit conversion and per-stat formatting functions
pub mod units;

pub use units::{format_distance, format_pace, format_speed, format_steps, format_time};

use crate::models::{
    DistanceUnit, PaceUnit, RunSession, SpeedUnit, TrackingSnapshot, UnitsSnapshot,
};
use serde::{Deserialize, Serialize};

/// A stat the display can show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    /// Distance covered
    #[default]
    Distance,
    /// Time per unit distance
    Pace,
    /// Distance per hour
    Speed,
    /// Elapsed time
    Time,
    /// Step count
    Steps,
}

impl StatKind {
    /// Display order, which a swipe gesture walks through
    pub const ALL: [Self; 5] = [
        Self::Distance,
        Self::Pace,
        Self::Speed,
        Self::Time,
        Self::Steps,
    ];

    /// Following stat, wrapping around
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Distance => Self::Pace,
            Self::Pace => Self::Speed,
            Self::Speed => Self::Time,
            Self::Time => Self::Steps,
            Self::Steps => Self::Distance,
        }
    }

    /// Preceding stat, wrapping around
    #[must_use]
    pub const fn previous(self) -> Self {
        match self {
            Self::Distance => Self::Steps,
            Self::Pace => Self::Distance,
            Self::Speed => Self::Pace,
            Self::Time => Self::Speed,
            Self::Steps => Self::Time,
        }
    }

    /// Caption shown under the number
    #[must_use]
    pub const fn label(self, units: &UnitsSnapshot) -> &'static str {
        match self {
            Self::Distance => match units.distance_unit {
                DistanceUnit::Km => "km",
                DistanceUnit::Miles => "mi",
            },
            Self::Pace => match units.pace_unit {
                PaceUnit::MinPerKm => "min/km",
                PaceUnit::MinPerMile => "min/mi",
            },
            Self::Speed => match units.speed_unit {
                SpeedUnit::Kmh => "km/h",
                SpeedUnit::Mph => "mph",
            },
            Self::Time => "time",
            Self::Steps => "steps",
        }
    }
}

/// Raw quantities a stat is rendered from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatValues {
    /// Distance in meters
    pub distance_meters: f64,
    /// Speed used for pace and speed stats
    pub speed_mps: f64,
    /// Elapsed whole seconds
    pub elapsed_seconds: u64,
    /// Step count
    pub step_count: u64,
}

impl StatValues {
    /// Live values: pace and speed follow the current speed
    #[must_use]
    pub const fn live(snapshot: &TrackingSnapshot) -> Self {
        Self {
            distance_meters: snapshot.distance_meters,
            speed_mps: snapshot.current_speed_mps,
            elapsed_seconds: snapshot.elapsed_seconds,
            step_count: snapshot.step_count,
        }
    }

    /// Historical values: pace and speed follow the run's average
    #[must_use]
    pub const fn recorded(session: &RunSession) -> Self {
        Self {
            distance_meters: session.distance_meters,
            speed_mps: session.average_speed_mps,
            elapsed_seconds: session.duration_seconds,
            step_count: session.step_count,
        }
    }
}

/// Render one stat in the given units
#[must_use]
pub fn format_stat(kind: StatKind, values: &StatValues, units: &UnitsSnapshot) -> String {
    match kind {
        StatKind::Distance => format_distance(values.distance_meters, units.distance_unit),
        StatKind::Pace => format_pace(values.speed_mps, units.pace_unit),
        StatKind::Speed => format_speed(values.speed_mps, units.speed_unit),
        StatKind::Time => format_time(values.elapsed_seconds),
        StatKind::Steps => format_steps(values.step_count),
    }
}

/// Render a stored run using the units captured when it was recorded
#[must_use]
pub fn format_recorded_stat(kind: StatKind, session: &RunSession) -> String {
    format_stat(kind, &StatValues::recorded(session), &session.units_snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_visits_every_stat() {
        let mut kind = StatKind::Distance;
        for expected in StatKind::ALL {
            assert_eq!(kind, expected);
            kind = kind.next();
        }
        assert_eq!(kind, StatKind::Distance);
        assert_eq!(StatKind::Distance.previous(), StatKind::Steps);
        for kind in StatKind::ALL {
            assert_eq!(kind.next().previous(), kind);
        }
    }

    #[test]
    fn test_format_stat_dispatch() {
        let values = StatValues {
            distance_meters: 5_000.0,
            speed_mps: 2.5,
            elapsed_seconds: 2_000,
            step_count: 5_432,
        };
        let units = UnitsSnapshot::default();

        assert_eq!(format_stat(StatKind::Distance, &values, &units), "5.00");
        assert_eq!(format_stat(StatKind::Pace, &values, &units), "6:40");
        assert_eq!(format_stat(StatKind::Speed, &values, &units), "9.0");
        assert_eq!(format_stat(StatKind::Time, &values, &units), "33:20");
        assert_eq!(format_stat(StatKind::Steps, &values, &units), "5,432");
    }

    #[test]
    fn test_labels_follow_units() {
        let imperial = UnitsSnapshot {
            distance_unit: DistanceUnit::Miles,
            pace_unit: PaceUnit::MinPerMile,
            speed_unit: SpeedUnit::Mph,
        };
        assert_eq!(StatKind::Distance.label(&imperial), "mi");
        assert_eq!(StatKind::Pace.label(&imperial), "min/mi");
        assert_eq!(StatKind::Speed.label(&UnitsSnapshot::default()), "km/h");
    }

    #[test]
    fn test_recorded_stat_uses_captured_units() {
        let session = RunSession {
            id: "run-1".into(),
            started_at_unix_ms: 0,
            duration_seconds: 600,
            distance_meters: 3_218.68,
            average_speed_mps: 5.364_466,
            step_count: 1_800,
            units_snapshot: UnitsSnapshot {
                distance_unit: DistanceUnit::Miles,
                pace_unit: PaceUnit::MinPerMile,
                speed_unit: SpeedUnit::Mph,
            },
        };
        assert_eq!(format_recorded_stat(StatKind::Distance, &session), "2.00");
        assert_eq!(format_recorded_stat(StatKind::Pace, &session), "5:00");
    }
}
