// ABOUTME: Core data models for the run tracker
// ABOUTME: Re-exports settings, location, step, snapshot, and run session types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! # Data Models
//!
//! - `UserSettings`: display units, theme, rotation lock, GPS profile
//! - `LocationFix`: one raw GPS sample
//! - `StepUpdate`: one step-counter callback
//! - `TrackingSnapshot`: the live state of an in-progress run
//! - `RunSession`: an immutable record of a completed run
//!
//! Every model is a plain value: components exchange copies, never shared
//! mutable references.

mod location;
mod run;
mod settings;
mod snapshot;
mod steps;

pub use location::{Coordinate, LocationFix};
pub use run::RunSession;
pub use settings::{
    DistanceUnit, GpsAccuracy, PaceUnit, SpeedUnit, Theme, UnitsSnapshot, UserSettings,
};
pub use snapshot::{TrackingPhase, TrackingSnapshot};
pub use steps::{StepReporting, StepUpdate};
