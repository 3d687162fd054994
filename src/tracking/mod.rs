// ABOUTME: Live run tracking: engine, noise gate, and clock
// ABOUTME: Reduces a noisy GPS fix stream and step callbacks to distance, speed, time, and steps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

/// Wall-clock abstraction
pub mod clock;
/// Run lifecycle and accumulators
pub mod engine;
/// Position delta filter
pub mod noise_gate;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{FixDisposition, StartOutcome, TrackingEngine};
pub use noise_gate::{GateRejection, NoiseGate};
