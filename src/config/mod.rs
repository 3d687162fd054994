// ABOUTME: Configuration management for the tracking engine and persistence layer
// ABOUTME: Typed, environment-driven settings with documented defaults and validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

//! Configuration module
//!
//! - **Tracking**: noise gate bounds, ticker interval, GPS sampling profiles
//! - **Storage**: data directory and history retention cap
//!
//! Every value has a default; unparsable environment values fall back to the
//! default and `validate()` rejects combinations that cannot work.

/// Tracking engine configuration
pub mod tracking;

/// Persistence configuration
pub mod storage;

pub use storage::StorageConfig;
pub use tracking::TrackingConfig;

use crate::errors::AppResult;
use std::env;
use std::str::FromStr;
use tracing::debug;

/// Complete runtime configuration
#[derive(Debug, Clone, Default)]
pub struct StrideConfig {
    /// Tracking engine settings
    pub tracking: TrackingConfig,
    /// Persistence settings
    pub storage: StorageConfig,
}

impl StrideConfig {
    /// Load configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let config = Self {
            tracking: TrackingConfig::from_env(),
            storage: StorageConfig::from_env(),
        };
        debug!(
            gate.min = config.tracking.noise_gate.min_delta_meters,
            gate.max = config.tracking.noise_gate.max_delta_meters,
            data_dir = %config.storage.data_dir.display(),
            "Configuration loaded"
        );
        config
    }

    /// Check every section
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` describing the first bad value
    pub fn validate(&self) -> AppResult<()> {
        self.tracking.validate()?;
        self.storage.validate()
    }
}

/// Parse an environment variable, falling back to `default` when unset or malformed
pub(crate) fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
