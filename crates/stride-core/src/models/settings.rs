// ABOUTME: User preference model with display units, theme, and GPS profile
// ABOUTME: Defines the unit enumerations and the documented default settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Implements `Display` and `FromStr` over the wire names of a unit enum
macro_rules! wire_names {
    ($ty:ident { $($variant:ident => $name:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $ty {
            /// Wire name used in persisted records and on the command line
            #[must_use]
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = AppError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($name $(| $alias)* => Ok(Self::$variant),)+
                    other => Err(AppError::invalid_input(format!(
                        "unknown {}: {other}",
                        stringify!($ty)
                    ))),
                }
            }
        }
    };
}

/// Unit for displayed distances
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceUnit {
    /// Kilometers
    #[default]
    #[serde(rename = "km")]
    Km,
    /// Statute miles
    #[serde(rename = "miles")]
    Miles,
}

wire_names!(DistanceUnit { Km => "km", Miles => "miles" | "mi" });

/// Unit for displayed pace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaceUnit {
    /// Minutes per kilometer
    #[default]
    #[serde(rename = "min/km")]
    MinPerKm,
    /// Minutes per mile
    #[serde(rename = "min/mile")]
    MinPerMile,
}

wire_names!(PaceUnit { MinPerKm => "min/km" | "min-km", MinPerMile => "min/mile" | "min-mile" });

/// Unit for displayed speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SpeedUnit {
    /// Kilometers per hour
    #[default]
    #[serde(rename = "kmh")]
    Kmh,
    /// Miles per hour
    #[serde(rename = "mph")]
    Mph,
}

wire_names!(SpeedUnit { Kmh => "kmh" | "km/h", Mph => "mph" });

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light background
    #[default]
    Light,
    /// Dark background
    Dark,
}

wire_names!(Theme { Light => "light", Dark => "dark" });

/// GPS sampling profile requested from the location source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GpsAccuracy {
    /// One-second fixes, one-meter movement threshold
    #[default]
    High,
    /// Coarser fixes to save battery
    Balanced,
}

wire_names!(GpsAccuracy { High => "high", Balanced => "balanced" });

/// User preferences. Replaced wholesale on save, never patched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    /// Unit for distance
    pub distance_unit: DistanceUnit,
    /// Unit for pace
    pub pace_unit: PaceUnit,
    /// Unit for speed
    pub speed_unit: SpeedUnit,
    /// Display theme
    pub theme: Theme,
    /// Keep the screen from rotating during a run
    pub lock_rotation: bool,
    /// GPS sampling profile
    pub gps_accuracy: GpsAccuracy,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::Km,
            pace_unit: PaceUnit::MinPerKm,
            speed_unit: SpeedUnit::Kmh,
            theme: Theme::Light,
            lock_rotation: true,
            gps_accuracy: GpsAccuracy::High,
        }
    }
}

impl UserSettings {
    /// Units in effect, captured into a run record
    #[must_use]
    pub const fn units_snapshot(&self) -> UnitsSnapshot {
        UnitsSnapshot {
            distance_unit: self.distance_unit,
            pace_unit: self.pace_unit,
            speed_unit: self.speed_unit,
        }
    }
}

/// Display units captured at the moment a run was recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitsSnapshot {
    /// Unit for distance
    pub distance_unit: DistanceUnit,
    /// Unit for pace
    pub pace_unit: PaceUnit,
    /// Unit for speed
    pub speed_unit: SpeedUnit,
}
