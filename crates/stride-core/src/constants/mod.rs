// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for tracking, units, and storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single large file.

/// Noise gate thresholds and GPS sampling profiles
pub mod tracking;
/// Unit conversion and measurement constants
pub mod units;
/// Persistence keys and retention limits
pub mod storage;

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Lower noise gate bound in meters
    pub const NOISE_GATE_MIN_METERS: &str = "STRIDE_NOISE_GATE_MIN_METERS";
    /// Upper noise gate bound in meters
    pub const NOISE_GATE_MAX_METERS: &str = "STRIDE_NOISE_GATE_MAX_METERS";
    /// Elapsed-time ticker period in milliseconds
    pub const TICK_INTERVAL_MS: &str = "STRIDE_TICK_INTERVAL_MS";
    /// Directory holding persisted records
    pub const DATA_DIR: &str = "STRIDE_DATA_DIR";
    /// Maximum number of stored runs
    pub const HISTORY_CAP: &str = "STRIDE_HISTORY_CAP";
}

/// Service identification used in structured logs
pub mod service_names {
    /// Library service name
    pub const STRIDE: &str = "stride";
    /// CLI service name
    pub const STRIDE_CLI: &str = "stride-cli";
}
