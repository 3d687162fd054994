// ABOUTME: Persistence configuration loaded from the environment
// ABOUTME: Data directory for file-backed records and the run history retention cap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stride Contributors

use super::env_parse_or;
use crate::constants::env_config;
use crate::constants::storage::{DATA_DIR_NAME, MAX_STORED_RUNS};
use crate::errors::{AppError, AppResult};
use std::env;
use std::path::PathBuf;

/// Where and how much to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory holding one file per persisted record
    pub data_dir: PathBuf,
    /// Maximum runs kept in history; older runs are discarded
    pub history_cap: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            history_cap: MAX_STORED_RUNS,
        }
    }
}

impl StorageConfig {
    /// Load from `STRIDE_DATA_DIR` and `STRIDE_HISTORY_CAP`
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var(env_config::DATA_DIR)
                .ok()
                .filter(|dir| !dir.trim().is_empty())
                .map_or_else(default_data_dir, PathBuf::from),
            history_cap: env_parse_or(env_config::HISTORY_CAP, MAX_STORED_RUNS),
        }
    }

    /// Same configuration rooted at another directory
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Reject a zero retention cap
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_INVALID` when `history_cap` is zero
    pub fn validate(&self) -> AppResult<()> {
        if self.history_cap == 0 {
            return Err(AppError::config("history cap must be at least 1"));
        }
        Ok(())
    }
}

/// Platform data directory (`~/.local/share/stride` on Linux), or `./stride`
fn default_data_dir() -> PathBuf {
    dirs::data_dir().map_or_else(|| PathBuf::from(DATA_DIR_NAME), |dir| dir.join(DATA_DIR_NAME))
}
